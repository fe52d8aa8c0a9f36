// src/services/finance_service.rs

use std::sync::Arc;

use chrono::{Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        money::{check_amount, round_cents},
    },
    db::MovementStore,
    models::finance::{
        CreateMovementPayload, FinancialMovement, FinancialSummary, MovementChanges, MovementKind,
        MovementStatus, MovementTemplate, NewMovement, PaymentSettlement,
    },
};

pub const MIN_INSTALLMENTS: u32 = 2;
pub const MAX_INSTALLMENTS: u32 = 120;

const SETTLEMENT_CATEGORY: &str = "Geral";

/// Expande um lançamento recorrente em `count` parcelas mensais.
///
/// A parcela `i` vence `i - 1` meses depois da primeira, sempre contando a
/// partir da primeira data: 31/01 vira 29/02 (ou 28/02) e depois volta a 31/03.
/// Cada parcela leva o valor cheio e o sufixo " (i/count)" na descrição.
pub fn generate_installments(
    template: &MovementTemplate,
    count: u32,
    first_due_date: NaiveDate,
    batch_id: Uuid,
) -> Result<Vec<NewMovement>, AppError> {
    if !(MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&count) {
        return Err(AppError::InvalidInput(format!(
            "número de parcelas deve estar entre {} e {}",
            MIN_INSTALLMENTS, MAX_INSTALLMENTS
        )));
    }

    let created_at = Utc::now();
    let total = count as i32;

    (1..=count)
        .map(|i| -> Result<NewMovement, AppError> {
            let due_date = first_due_date
                .checked_add_months(Months::new(i - 1))
                .ok_or_else(|| {
                    AppError::InvalidInput(format!("data da parcela {}/{} fora do calendário", i, count))
                })?;

            Ok(NewMovement {
                id: Uuid::new_v4(),
                kind: template.kind,
                category: template.category.clone(),
                description: format!("{} ({}/{})", template.description, i, count),
                amount: template.amount,
                status: template.status,
                due_date,
                note: template.note.clone(),
                related_party_id: template.related_party_id,
                installment_index: Some(i as i32),
                installment_total: Some(total),
                batch_id: Some(batch_id),
                created_at,
            })
        })
        .collect()
}

/// Regra da listagem do financeiro: arquivados somem, cancelados somem depois
/// de vencidos, busca sem diferenciar maiúsculas. Ordem crescente de vencimento.
pub fn visible_movements(
    movements: Vec<FinancialMovement>,
    today: NaiveDate,
    search: Option<&str>,
) -> Vec<FinancialMovement> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut visible: Vec<FinancialMovement> = movements
        .into_iter()
        .filter(|m| match m.status {
            MovementStatus::Archived => false,
            MovementStatus::Cancelled => m.due_date >= today,
            _ => true,
        })
        .filter(|m| match &needle {
            Some(n) => {
                m.description.to_lowercase().contains(n) || m.category.to_lowercase().contains(n)
            }
            None => true,
        })
        .collect();

    visible.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.created_at.cmp(&b.created_at)));
    visible
}

/// Totais dos cards (cancelados não entram).
pub fn summarize(movements: &[FinancialMovement]) -> FinancialSummary {
    let (total_inflow, total_outflow) = movements
        .iter()
        .filter(|m| m.status != MovementStatus::Cancelled)
        .fold((Decimal::ZERO, Decimal::ZERO), |(inflow, outflow), m| match m.kind {
            MovementKind::Inflow => (inflow + m.amount, outflow),
            MovementKind::Outflow => (inflow, outflow + m.amount),
        });

    FinancialSummary {
        total_inflow,
        total_outflow,
        balance: total_inflow - total_outflow,
    }
}

fn validate_template(template: &MovementTemplate) -> Result<(), AppError> {
    check_amount("amount", template.amount)?;
    if template.description.is_empty() {
        return Err(AppError::InvalidInput("descrição obrigatória".into()));
    }
    Ok(())
}

#[derive(Clone)]
pub struct FinanceService {
    store: Arc<dyn MovementStore>,
}

impl FinanceService {
    pub fn new(store: Arc<dyn MovementStore>) -> Self {
        Self { store }
    }

    /// Cria um lançamento avulso ou, se recorrente, o lote inteiro de parcelas.
    pub async fn create_movement(
        &self,
        payload: &CreateMovementPayload,
    ) -> Result<Vec<FinancialMovement>, AppError> {
        let template = payload.template();
        validate_template(&template)?;

        if !payload.recurring {
            let movement = self.store.insert(NewMovement::single(template, payload.due_date)).await?;
            return Ok(vec![movement]);
        }

        let count = payload.installments.ok_or_else(|| {
            AppError::InvalidInput("lançamento recorrente exige o número de parcelas".into())
        })?;

        // Reenvio do mesmo lote: devolve o que já foi gravado
        if let Some(batch_id) = payload.batch_id {
            let existing = self.store.find_by_batch(batch_id).await?;
            if !existing.is_empty() {
                tracing::info!("♻️ Lote {} já gravado ({} parcelas)", batch_id, existing.len());
                return Ok(existing);
            }
        }

        let batch_id = payload.batch_id.unwrap_or_else(Uuid::new_v4);
        let batch = generate_installments(&template, count, payload.due_date, batch_id)?;
        let saved = self.store.insert_batch(batch).await?;

        tracing::info!("✅ Lote {} gravado com {} parcelas", batch_id, saved.len());
        Ok(saved)
    }

    pub async fn update_movement(
        &self,
        id: Uuid,
        changes: MovementChanges,
    ) -> Result<FinancialMovement, AppError> {
        validate_template(&changes.template)?;
        self.store
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("lançamento {}", id)))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: MovementStatus,
    ) -> Result<FinancialMovement, AppError> {
        self.store
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("lançamento {}", id)))
    }

    pub async fn delete_movement(&self, id: Uuid) -> Result<(), AppError> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::ResourceNotFound(format!("lançamento {}", id)))
        }
    }

    pub async fn list_movements(
        &self,
        today: NaiveDate,
        search: Option<&str>,
    ) -> Result<Vec<FinancialMovement>, AppError> {
        let all = self.store.list_all().await?;
        Ok(visible_movements(all, today, search))
    }

    pub async fn summary(&self) -> Result<FinancialSummary, AppError> {
        let all = self.store.list_all().await?;
        Ok(summarize(&all))
    }

    /// Baixa de pagamento: consolida o primeiro pendente com o valor exato;
    /// sem pendente, registra uma saída já consolidada vencendo hoje.
    pub async fn settle_payment(
        &self,
        counterparty: &str,
        amount: Decimal,
        related_party_id: Option<Uuid>,
        today: NaiveDate,
    ) -> Result<PaymentSettlement, AppError> {
        // Mesma escala do que foi gravado, senão 10.005 nunca casa com 10.01
        let amount = round_cents(amount);
        check_amount("amount", amount)?;

        if let Some(pending) = self.store.find_pending_by_amount(amount).await? {
            let movement = self
                .store
                .update_status(pending.id, MovementStatus::Settled)
                .await?
                .ok_or_else(|| AppError::ResourceNotFound(format!("lançamento {}", pending.id)))?;
            tracing::info!("💰 Pagamento de {} consolidou o lançamento {}", amount, movement.id);
            return Ok(PaymentSettlement { movement, matched_pending: true });
        }

        let template = MovementTemplate {
            kind: MovementKind::Outflow,
            category: SETTLEMENT_CATEGORY.to_string(),
            description: format!("Pagamento: {}", counterparty.trim()),
            amount,
            status: MovementStatus::Settled,
            note: None,
            related_party_id,
        };
        let movement = self.store.insert(NewMovement::single(template, today)).await?;
        tracing::info!("💸 Pagamento de {} registrado como nova saída {}", amount, movement.id);

        Ok(PaymentSettlement { movement, matched_pending: false })
    }
}
