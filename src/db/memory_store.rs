// src/db/memory_store.rs

// Armazenamento em memória: usado quando não há DATABASE_URL (modo local)
// e pelos testes. Mesmas regras do Postgres, inclusive a chave única dos
// orçamentos e o lote de parcelas tudo-ou-nada.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{MovementStore, ProposalStore, SettingsStore},
    models::{
        finance::{FinancialMovement, MovementChanges, MovementStatus, NewMovement},
        pricing::PricingDefaults,
        proposal::{DedupKey, NewProposal, Proposal, ProposalStatus},
        settings::{NotificationSettings, SettingsRecord},
    },
};

#[derive(Debug, Default)]
struct MemoryData {
    proposals: Vec<Proposal>,
    movements: Vec<FinancialMovement>,
    settings: Option<SettingsRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Já começa com um registro de configurações salvo.
    pub fn with_settings(settings: SettingsRecord) -> Self {
        Self {
            data: RwLock::new(MemoryData {
                settings: Some(settings),
                ..MemoryData::default()
            }),
        }
    }
}

#[async_trait]
impl ProposalStore for MemoryStore {
    async fn find_by_key(&self, key: &DedupKey) -> Result<Vec<Proposal>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .proposals
            .iter()
            .filter(|p| &p.dedup_key() == key)
            .cloned()
            .collect())
    }

    async fn insert(&self, new: NewProposal) -> Result<Option<Proposal>, AppError> {
        // Checagem e inserção sob o mesmo lock de escrita
        let mut data = self.data.write().await;
        if data.proposals.iter().any(|p| p.dedup_key() == new.key) {
            return Ok(None);
        }

        let proposal = Proposal {
            id: new.id,
            client_id: new.key.client_id,
            client_name: new.fields.client_name,
            representative: new.key.representative,
            department: new.fields.department,
            scope_description: new.fields.scope_description,
            reference: new.fields.reference,
            objective: new.fields.objective,
            jps_responsibilities: new.fields.jps_responsibilities,
            client_responsibilities: new.fields.client_responsibilities,
            total_value: new.key.total_value,
            deadline: new.key.deadline,
            status: ProposalStatus::Generated,
            pdf_url: None,
            icon_url: new.icon_url,
            proposal_date: new.proposal_date,
            created_at: new.created_at,
            updated_at: new.created_at,
        };
        data.proposals.push(proposal.clone());

        Ok(Some(proposal))
    }

    async fn refresh_icon(&self, id: Uuid, icon_url: Option<&str>) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        if let Some(p) = data.proposals.iter_mut().find(|p| p.id == id) {
            p.icon_url = icon_url.map(str::to_string);
            p.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn attach_pdf(
        &self,
        id: Uuid,
        pdf_url: &str,
        icon_url: Option<&str>,
    ) -> Result<Option<Proposal>, AppError> {
        let mut data = self.data.write().await;
        let Some(p) = data.proposals.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        p.pdf_url = Some(pdf_url.to_string());
        p.status = ProposalStatus::PdfGenerated;
        p.icon_url = icon_url.map(str::to_string);
        p.updated_at = Utc::now();
        Ok(Some(p.clone()))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Proposal>, AppError> {
        let data = self.data.read().await;
        Ok(data.proposals.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, client_id: Option<Uuid>) -> Result<Vec<Proposal>, AppError> {
        let data = self.data.read().await;
        let mut proposals: Vec<Proposal> = data
            .proposals
            .iter()
            .filter(|p| client_id.is_none_or(|c| p.client_id == c))
            .cloned()
            .collect();
        proposals.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(proposals)
    }
}

#[async_trait]
impl MovementStore for MemoryStore {
    async fn insert(&self, new: NewMovement) -> Result<FinancialMovement, AppError> {
        let movement = new.into_movement();
        self.data.write().await.movements.push(movement.clone());
        Ok(movement)
    }

    async fn insert_batch(&self, batch: Vec<NewMovement>) -> Result<Vec<FinancialMovement>, AppError> {
        // Checagem e inserção sob o mesmo lock de escrita
        let mut data = self.data.write().await;

        if let Some(batch_id) = batch.first().and_then(|m| m.batch_id) {
            let mut existing: Vec<FinancialMovement> = data
                .movements
                .iter()
                .filter(|m| m.batch_id == Some(batch_id))
                .cloned()
                .collect();
            if !existing.is_empty() {
                existing.sort_by_key(|m| m.installment_index);
                return Ok(existing);
            }
        }

        let inserted: Vec<FinancialMovement> =
            batch.into_iter().map(NewMovement::into_movement).collect();
        data.movements.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn find_by_batch(&self, batch_id: Uuid) -> Result<Vec<FinancialMovement>, AppError> {
        let data = self.data.read().await;
        let mut movements: Vec<FinancialMovement> = data
            .movements
            .iter()
            .filter(|m| m.batch_id == Some(batch_id))
            .cloned()
            .collect();
        movements.sort_by_key(|m| m.installment_index);
        Ok(movements)
    }

    async fn list_all(&self) -> Result<Vec<FinancialMovement>, AppError> {
        let data = self.data.read().await;
        let mut movements = data.movements.clone();
        movements.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.created_at.cmp(&b.created_at)));
        Ok(movements)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: MovementChanges,
    ) -> Result<Option<FinancialMovement>, AppError> {
        let mut data = self.data.write().await;
        let Some(m) = data.movements.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        let t = changes.template;
        m.kind = t.kind;
        m.category = t.category;
        m.description = t.description;
        m.amount = t.amount;
        m.status = t.status;
        m.due_date = changes.due_date;
        m.note = t.note;
        m.related_party_id = t.related_party_id;
        m.updated_at = Utc::now();
        Ok(Some(m.clone()))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MovementStatus,
    ) -> Result<Option<FinancialMovement>, AppError> {
        let mut data = self.data.write().await;
        let Some(m) = data.movements.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        m.status = status;
        m.updated_at = Utc::now();
        Ok(Some(m.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut data = self.data.write().await;
        let before = data.movements.len();
        data.movements.retain(|m| m.id != id);
        Ok(data.movements.len() < before)
    }

    async fn find_pending_by_amount(&self, amount: Decimal) -> Result<Option<FinancialMovement>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .movements
            .iter()
            .filter(|m| m.status == MovementStatus::Pending && m.amount == amount)
            .min_by(|a, b| a.due_date.cmp(&b.due_date).then(a.created_at.cmp(&b.created_at)))
            .cloned())
    }

    async fn list_pending_due_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FinancialMovement>, AppError> {
        let data = self.data.read().await;
        let mut movements: Vec<FinancialMovement> = data
            .movements
            .iter()
            .filter(|m| m.status == MovementStatus::Pending && m.due_date >= from && m.due_date <= to)
            .cloned()
            .collect();
        movements.sort_by_key(|m| m.due_date);
        Ok(movements)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self) -> Result<SettingsRecord, AppError> {
        Ok(self.data.read().await.settings.clone().unwrap_or_default())
    }

    async fn update_pricing(&self, defaults: PricingDefaults) -> Result<SettingsRecord, AppError> {
        let mut data = self.data.write().await;
        let record = data.settings.get_or_insert_with(SettingsRecord::default);
        record.pricing = defaults;
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn update_notifications(
        &self,
        notifications: NotificationSettings,
    ) -> Result<SettingsRecord, AppError> {
        let mut data = self.data.write().await;
        let record = data.settings.get_or_insert_with(SettingsRecord::default);
        record.notifications = notifications;
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }
}
