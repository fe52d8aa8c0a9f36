// src/db/finance_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::MovementStore,
    models::finance::{FinancialMovement, MovementChanges, MovementStatus, NewMovement},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Usado tanto no insert avulso (pool) quanto dentro da transação do lote
    async fn insert_with<'e, E>(&self, executor: E, new: &NewMovement) -> Result<FinancialMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, FinancialMovement>(
            r#"
            INSERT INTO financial_movements (
                id, kind, category, description, amount, status, due_date,
                note, related_party_id, installment_index, installment_total,
                batch_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
            .bind(new.id)
            .bind(new.kind)
            .bind(&new.category)
            .bind(&new.description)
            .bind(new.amount)
            .bind(new.status)
            .bind(new.due_date)
            .bind(new.note.as_deref())
            .bind(new.related_party_id)
            .bind(new.installment_index)
            .bind(new.installment_total)
            .bind(new.batch_id)
            .bind(new.created_at)
            .fetch_one(executor)
            .await?;

        Ok(movement)
    }
}

#[async_trait]
impl MovementStore for FinanceRepository {
    async fn insert(&self, new: NewMovement) -> Result<FinancialMovement, AppError> {
        self.insert_with(&self.pool, &new).await
    }

    async fn insert_batch(&self, batch: Vec<NewMovement>) -> Result<Vec<FinancialMovement>, AppError> {
        // Uma transação para o lote inteiro: ou todas as parcelas ou nenhuma
        let mut tx = self.pool.begin().await?;
        let total = batch.len();
        let mut inserted = Vec::with_capacity(total);

        for (position, new) in batch.iter().enumerate() {
            match self.insert_with(&mut *tx, new).await {
                Ok(movement) => inserted.push(movement),
                // Outro envio com o mesmo lote chegou primeiro (índice único em
                // batch_id + parcela): descarta este tx e devolve o vencedor
                Err(AppError::DatabaseError(sqlx::Error::Database(db_err)))
                    if db_err.is_unique_violation() =>
                {
                    drop(tx);
                    let Some(batch_id) = new.batch_id else {
                        return Err(AppError::DatabaseError(sqlx::Error::Database(db_err)));
                    };
                    tracing::info!("♻️ Lote {} já gravado por outro envio", batch_id);
                    return self.find_by_batch(batch_id).await;
                }
                Err(e) => {
                    // Se falhar aqui, o tx sofre rollback automático ao sair do escopo (drop)
                    tracing::error!(
                        "🔥 Falha ao inserir parcela {}/{} do lote {:?}: {}",
                        position + 1,
                        total,
                        new.batch_id,
                        e
                    );
                    return Err(e);
                }
            }
        }

        tx.commit().await?;

        Ok(inserted)
    }

    async fn find_by_batch(&self, batch_id: Uuid) -> Result<Vec<FinancialMovement>, AppError> {
        let movements = sqlx::query_as::<_, FinancialMovement>(
            r#"
            SELECT * FROM financial_movements
            WHERE batch_id = $1
            ORDER BY installment_index ASC
            "#,
        )
            .bind(batch_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(movements)
    }

    async fn list_all(&self) -> Result<Vec<FinancialMovement>, AppError> {
        let movements = sqlx::query_as::<_, FinancialMovement>(
            "SELECT * FROM financial_movements ORDER BY due_date ASC, created_at ASC",
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(movements)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: MovementChanges,
    ) -> Result<Option<FinancialMovement>, AppError> {
        let t = &changes.template;
        let movement = sqlx::query_as::<_, FinancialMovement>(
            r#"
            UPDATE financial_movements
            SET kind = $1, category = $2, description = $3, amount = $4,
                status = $5, due_date = $6, note = $7, related_party_id = $8,
                updated_at = NOW()
            WHERE id = $9
            RETURNING *
            "#,
        )
            .bind(t.kind)
            .bind(&t.category)
            .bind(&t.description)
            .bind(t.amount)
            .bind(t.status)
            .bind(changes.due_date)
            .bind(t.note.as_deref())
            .bind(t.related_party_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movement)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: MovementStatus,
    ) -> Result<Option<FinancialMovement>, AppError> {
        let movement = sqlx::query_as::<_, FinancialMovement>(
            r#"
            UPDATE financial_movements
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
            .bind(status)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movement)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM financial_movements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_pending_by_amount(&self, amount: Decimal) -> Result<Option<FinancialMovement>, AppError> {
        let movement = sqlx::query_as::<_, FinancialMovement>(
            r#"
            SELECT * FROM financial_movements
            WHERE status = 'PENDING' AND amount = $1
            ORDER BY due_date ASC, created_at ASC
            LIMIT 1
            "#,
        )
            .bind(amount)
            .fetch_optional(&self.pool)
            .await?;

        Ok(movement)
    }

    async fn list_pending_due_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FinancialMovement>, AppError> {
        let movements = sqlx::query_as::<_, FinancialMovement>(
            r#"
            SELECT * FROM financial_movements
            WHERE status = 'PENDING'
              AND due_date BETWEEN $1 AND $2
            ORDER BY due_date ASC
            "#,
        )
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(movements)
    }
}
