// src/db/store.rs

// Contratos do armazenamento. Os serviços só enxergam estes traits, então
// podem rodar tanto sobre o Postgres quanto sobre o MemoryStore.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        finance::{FinancialMovement, MovementChanges, MovementStatus, NewMovement},
        pricing::PricingDefaults,
        proposal::{DedupKey, NewProposal, Proposal},
        settings::{NotificationSettings, SettingsRecord},
    },
};

#[async_trait]
pub trait ProposalStore: Send + Sync {
    /// Todos os orçamentos com a chave exata, do mais antigo para o mais novo.
    async fn find_by_key(&self, key: &DedupKey) -> Result<Vec<Proposal>, AppError>;

    /// Insere o orçamento. `None` quando outro registro com a mesma chave já existe.
    async fn insert(&self, new: NewProposal) -> Result<Option<Proposal>, AppError>;

    async fn refresh_icon(&self, id: Uuid, icon_url: Option<&str>) -> Result<(), AppError>;

    async fn attach_pdf(
        &self,
        id: Uuid,
        pdf_url: &str,
        icon_url: Option<&str>,
    ) -> Result<Option<Proposal>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Proposal>, AppError>;

    async fn list(&self, client_id: Option<Uuid>) -> Result<Vec<Proposal>, AppError>;
}

#[async_trait]
pub trait MovementStore: Send + Sync {
    async fn insert(&self, new: NewMovement) -> Result<FinancialMovement, AppError>;

    /// Insere todas as parcelas ou nenhuma. Se o `batch_id` já foi gravado
    /// (reenvio ou dois envios simultâneos), devolve as parcelas existentes.
    async fn insert_batch(&self, batch: Vec<NewMovement>) -> Result<Vec<FinancialMovement>, AppError>;

    async fn find_by_batch(&self, batch_id: Uuid) -> Result<Vec<FinancialMovement>, AppError>;

    async fn list_all(&self) -> Result<Vec<FinancialMovement>, AppError>;

    async fn update(
        &self,
        id: Uuid,
        changes: MovementChanges,
    ) -> Result<Option<FinancialMovement>, AppError>;

    async fn update_status(
        &self,
        id: Uuid,
        status: MovementStatus,
    ) -> Result<Option<FinancialMovement>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Primeiro pendente com o valor exato (vencimento mais próximo primeiro).
    async fn find_pending_by_amount(&self, amount: Decimal) -> Result<Option<FinancialMovement>, AppError>;

    async fn list_pending_due_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FinancialMovement>, AppError>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Nunca falha por ausência: sem registro salvo, devolve os padrões.
    async fn get(&self) -> Result<SettingsRecord, AppError>;

    async fn update_pricing(&self, defaults: PricingDefaults) -> Result<SettingsRecord, AppError>;

    async fn update_notifications(
        &self,
        notifications: NotificationSettings,
    ) -> Result<SettingsRecord, AppError>;
}
