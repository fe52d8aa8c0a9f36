// src/db/proposal_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::ProposalStore,
    models::proposal::{DedupKey, NewProposal, Proposal},
};

#[derive(Clone)]
pub struct ProposalRepository {
    pool: PgPool,
}

impl ProposalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProposalStore for ProposalRepository {
    async fn find_by_key(&self, key: &DedupKey) -> Result<Vec<Proposal>, AppError> {
        // Prazo nulo ("a combinar") só casa com outro prazo nulo
        let proposals = sqlx::query_as::<_, Proposal>(
            r#"
            SELECT * FROM proposals
            WHERE client_id = $1
              AND total_value = $2
              AND deadline IS NOT DISTINCT FROM $3
              AND representative = $4
            ORDER BY created_at ASC, id ASC
            "#,
        )
            .bind(key.client_id)
            .bind(key.total_value)
            .bind(key.deadline)
            .bind(&key.representative)
            .fetch_all(&self.pool)
            .await?;

        Ok(proposals)
    }

    async fn insert(&self, new: NewProposal) -> Result<Option<Proposal>, AppError> {
        // O índice único da chave resolve a corrida entre dois saves simultâneos:
        // quem perde não insere nada e recebe None.
        let proposal = sqlx::query_as::<_, Proposal>(
            r#"
            INSERT INTO proposals (
                id, client_id, client_name, representative, department,
                scope_description, reference, objective,
                jps_responsibilities, client_responsibilities,
                total_value, deadline, status, icon_url,
                proposal_date, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'GENERATED', $13, $14, $15, $15)
            ON CONFLICT DO NOTHING
            RETURNING *
            "#,
        )
            .bind(new.id)
            .bind(new.key.client_id)
            .bind(&new.fields.client_name)
            .bind(&new.key.representative)
            .bind(&new.fields.department)
            .bind(&new.fields.scope_description)
            .bind(&new.fields.reference)
            .bind(&new.fields.objective)
            .bind(&new.fields.jps_responsibilities)
            .bind(&new.fields.client_responsibilities)
            .bind(new.key.total_value)
            .bind(new.key.deadline)
            .bind(new.icon_url.as_deref())
            .bind(new.proposal_date)
            .bind(new.created_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(proposal)
    }

    async fn refresh_icon(&self, id: Uuid, icon_url: Option<&str>) -> Result<(), AppError> {
        sqlx::query("UPDATE proposals SET icon_url = $1, updated_at = NOW() WHERE id = $2")
            .bind(icon_url)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn attach_pdf(
        &self,
        id: Uuid,
        pdf_url: &str,
        icon_url: Option<&str>,
    ) -> Result<Option<Proposal>, AppError> {
        let proposal = sqlx::query_as::<_, Proposal>(
            r#"
            UPDATE proposals
            SET pdf_url = $1,
                status = 'PDF_GENERATED',
                icon_url = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
            .bind(pdf_url)
            .bind(icon_url)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(proposal)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Proposal>, AppError> {
        let proposal = sqlx::query_as::<_, Proposal>("SELECT * FROM proposals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(proposal)
    }

    async fn list(&self, client_id: Option<Uuid>) -> Result<Vec<Proposal>, AppError> {
        let proposals = sqlx::query_as::<_, Proposal>(
            r#"
            SELECT * FROM proposals
            WHERE ($1::uuid IS NULL OR client_id = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(proposals)
    }
}
