// src/services/proposal_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{error::AppError, money::check_magnitude},
    db::ProposalStore,
    models::proposal::{DedupKey, NewProposal, Proposal, ProposalFields, ProposalUpsert},
};

#[derive(Clone)]
pub struct ProposalService {
    store: Arc<dyn ProposalStore>,
    icon_url: Option<String>,
}

impl ProposalService {
    pub fn new(store: Arc<dyn ProposalStore>, icon_url: Option<String>) -> Self {
        Self { store, icon_url }
    }

    /// Salva o orçamento ou reaproveita um idêntico (mesmo cliente, valor,
    /// prazo e responsável). Salvar duas vezes devolve o mesmo id.
    pub async fn upsert(
        &self,
        key: DedupKey,
        fields: ProposalFields,
    ) -> Result<ProposalUpsert, AppError> {
        Self::validate_key(&key)?;

        if let Some(existing) = self.store.find_by_key(&key).await?.into_iter().next() {
            self.store.refresh_icon(existing.id, self.icon_url.as_deref()).await?;
            tracing::info!("♻️ Orçamento {} reaproveitado (mesma chave)", existing.id);
            return Ok(ProposalUpsert { id: existing.id, created: false });
        }

        let now = Utc::now();
        let new = NewProposal {
            id: Uuid::new_v4(),
            key: key.clone(),
            fields,
            icon_url: self.icon_url.clone(),
            proposal_date: now.date_naive(),
            created_at: now,
        };

        match self.store.insert(new).await? {
            Some(proposal) => {
                tracing::info!("📝 Orçamento {} criado para o cliente {}", proposal.id, key.client_id);
                Ok(ProposalUpsert { id: proposal.id, created: true })
            }
            // Outro save idêntico chegou primeiro: devolve o vencedor
            None => {
                let winner = self
                    .store
                    .find_by_key(&key)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| {
                        AppError::InternalServerError(anyhow::anyhow!(
                            "conflito na chave do orçamento sem registro correspondente"
                        ))
                    })?;
                self.store.refresh_icon(winner.id, self.icon_url.as_deref()).await?;
                Ok(ProposalUpsert { id: winner.id, created: false })
            }
        }
    }

    /// Grava o link do PDF gerado e marca o orçamento como "PDF Gerado".
    pub async fn attach_pdf(&self, id: Uuid, pdf_url: &str) -> Result<Proposal, AppError> {
        self.store
            .attach_pdf(id, pdf_url, self.icon_url.as_deref())
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("orçamento {}", id)))
    }

    pub async fn get(&self, id: Uuid) -> Result<Proposal, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("orçamento {}", id)))
    }

    pub async fn list(&self, client_id: Option<Uuid>) -> Result<Vec<Proposal>, AppError> {
        self.store.list(client_id).await
    }

    fn validate_key(key: &DedupKey) -> Result<(), AppError> {
        if key.client_id.is_nil() {
            return Err(AppError::InvalidInput("cliente obrigatório".into()));
        }
        if key.representative.is_empty() {
            return Err(AppError::InvalidInput("responsável obrigatório".into()));
        }
        check_magnitude("totalValue", key.total_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryStore, models::proposal::ProposalStatus};
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn service() -> ProposalService {
        ProposalService::new(Arc::new(MemoryStore::new()), Some("https://cdn.example/icon.png".into()))
    }

    fn key(client_id: Uuid, total: &str, deadline: Option<NaiveDate>) -> DedupKey {
        DedupKey::new(client_id, Decimal::from_str(total).unwrap(), deadline, "Carlos Silva")
    }

    fn fields() -> ProposalFields {
        ProposalFields {
            client_name: "Metalúrgica Exemplo".into(),
            ..ProposalFields::default()
        }
    }

    #[tokio::test]
    async fn identical_saves_share_one_id() {
        let service = service();
        let client = Uuid::new_v4();
        let deadline = NaiveDate::from_ymd_opt(2025, 3, 31);

        let first = service.upsert(key(client, "4450.00", deadline), fields()).await.unwrap();
        let second = service.upsert(key(client, "4450", deadline), fields()).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.id, second.id);
        assert_eq!(service.list(Some(client)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_identical_saves_resolve_to_one_row() {
        let service = service();
        let client = Uuid::new_v4();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.upsert(key(client, "750.10", None), fields()).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.dedup();

        assert_eq!(ids.len(), 1);
        assert_eq!(service.list(Some(client)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn different_total_creates_new_proposal() {
        let service = service();
        let client = Uuid::new_v4();

        let a = service.upsert(key(client, "4450.00", None), fields()).await.unwrap();
        let b = service.upsert(key(client, "4450.01", None), fields()).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(b.created);
    }

    #[tokio::test]
    async fn missing_deadline_only_matches_missing_deadline() {
        let service = service();
        let client = Uuid::new_v4();

        let open = service.upsert(key(client, "100", None), fields()).await.unwrap();
        let dated = service
            .upsert(key(client, "100", NaiveDate::from_ymd_opt(2025, 1, 1)), fields())
            .await
            .unwrap();
        let open_again = service.upsert(key(client, "100", None), fields()).await.unwrap();

        assert_ne!(open.id, dated.id);
        assert_eq!(open.id, open_again.id);
    }

    #[tokio::test]
    async fn new_proposal_starts_generated_with_icon() {
        let service = service();
        let saved = service.upsert(key(Uuid::new_v4(), "10", None), fields()).await.unwrap();

        let proposal = service.get(saved.id).await.unwrap();
        assert_eq!(proposal.status, ProposalStatus::Generated);
        assert_eq!(proposal.icon_url.as_deref(), Some("https://cdn.example/icon.png"));
        assert!(proposal.pdf_url.is_none());
    }

    #[tokio::test]
    async fn blank_representative_is_rejected() {
        let service = service();
        let key = DedupKey::new(Uuid::new_v4(), Decimal::ONE, None, "   ");

        assert_matches!(service.upsert(key, fields()).await, Err(AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn total_above_column_limit_is_rejected() {
        let service = service();
        let too_big = key(Uuid::new_v4(), "1000000000000.00", None);

        assert_matches!(service.upsert(too_big, fields()).await, Err(AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn attach_pdf_marks_status() {
        let service = service();
        let saved = service.upsert(key(Uuid::new_v4(), "10", None), fields()).await.unwrap();

        let updated = service.attach_pdf(saved.id, "https://drive.example/file.pdf").await.unwrap();
        assert_eq!(updated.status, ProposalStatus::PdfGenerated);
        assert_eq!(updated.pdf_url.as_deref(), Some("https://drive.example/file.pdf"));
    }

    #[tokio::test]
    async fn attach_pdf_to_unknown_id_is_not_found() {
        let result = service().attach_pdf(Uuid::new_v4(), "https://x.example/a.pdf").await;
        assert_matches!(result, Err(AppError::ResourceNotFound(_)));
    }
}
