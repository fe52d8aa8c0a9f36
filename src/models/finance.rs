// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::money::round_cents;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Inflow,  // Entrada
    Outflow, // Saída
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementStatus {
    #[default]
    Pending,   // Pendente
    Settled,   // Consolidado
    Cancelled, // Cancelado
    Archived,  // Arquivado
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMovement {
    pub id: Uuid,

    pub kind: MovementKind,

    #[schema(example = "Insumos")]
    pub category: String,

    #[schema(example = "Aluguel do galpão (1/12)")]
    pub description: String,

    #[schema(example = "1500.00")]
    pub amount: Decimal,

    pub status: MovementStatus,

    #[schema(value_type = String, format = Date, example = "2025-01-31")]
    pub due_date: NaiveDate,

    pub note: Option<String>,

    // Cliente vinculado (opcional)
    pub related_party_id: Option<Uuid>,

    // Só existem em lançamentos gerados como parcelas
    #[schema(example = 1)]
    pub installment_index: Option<i32>,
    #[schema(example = 12)]
    pub installment_total: Option<i32>,
    pub batch_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Base de um lançamento (avulso ou modelo das parcelas).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementTemplate {
    pub kind: MovementKind,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub status: MovementStatus,
    pub note: Option<String>,
    pub related_party_id: Option<Uuid>,
}

/// Lançamento pronto para inserir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    pub id: Uuid,
    pub kind: MovementKind,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub status: MovementStatus,
    pub due_date: NaiveDate,
    pub note: Option<String>,
    pub related_party_id: Option<Uuid>,
    pub installment_index: Option<i32>,
    pub installment_total: Option<i32>,
    pub batch_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl NewMovement {
    pub fn single(template: MovementTemplate, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: template.kind,
            category: template.category,
            description: template.description,
            amount: template.amount,
            status: template.status,
            due_date,
            note: template.note,
            related_party_id: template.related_party_id,
            installment_index: None,
            installment_total: None,
            batch_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn into_movement(self) -> FinancialMovement {
        FinancialMovement {
            id: self.id,
            kind: self.kind,
            category: self.category,
            description: self.description,
            amount: self.amount,
            status: self.status,
            due_date: self.due_date,
            note: self.note,
            related_party_id: self.related_party_id,
            installment_index: self.installment_index,
            installment_total: self.installment_total,
            batch_id: self.batch_id,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Edição em lugar de um lançamento existente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementChanges {
    pub template: MovementTemplate,
    pub due_date: NaiveDate,
}

// Cards do topo do financeiro
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_inflow: Decimal,
    pub total_outflow: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSettlement {
    pub movement: FinancialMovement,
    // true = consolidou um pendente existente; false = criou uma saída nova
    pub matched_pending: bool,
}

// --- Payloads ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementPayload {
    pub kind: MovementKind,

    #[serde(default)]
    #[schema(example = "Aluguel")]
    pub category: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Aluguel do galpão")]
    pub description: String,

    #[schema(example = "1500.00")]
    pub amount: Decimal,

    #[serde(default)]
    pub status: MovementStatus,

    #[schema(value_type = String, format = Date, example = "2025-01-31")]
    pub due_date: NaiveDate,

    pub note: Option<String>,
    pub related_party_id: Option<Uuid>,

    // Lançamento recorrente: gera `installments` parcelas mensais
    #[serde(default)]
    pub recurring: bool,

    // Só vale quando `recurring`; o serviço confere 2..=120
    #[schema(example = 12)]
    pub installments: Option<u32>,

    // Chave de idempotência do lote (gerada pelo cliente)
    pub batch_id: Option<Uuid>,
}

impl CreateMovementPayload {
    pub fn template(&self) -> MovementTemplate {
        MovementTemplate {
            kind: self.kind,
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
            amount: round_cents(self.amount),
            status: self.status,
            note: self.note.clone(),
            related_party_id: self.related_party_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovementPayload {
    pub kind: MovementKind,

    #[serde(default)]
    pub category: String,

    #[validate(length(min = 1, message = "required"))]
    pub description: String,

    pub amount: Decimal,
    pub status: MovementStatus,

    #[schema(value_type = String, format = Date, example = "2025-02-28")]
    pub due_date: NaiveDate,

    pub note: Option<String>,
    pub related_party_id: Option<Uuid>,
}

impl UpdateMovementPayload {
    pub fn into_changes(self) -> MovementChanges {
        MovementChanges {
            template: MovementTemplate {
                kind: self.kind,
                category: self.category.trim().to_string(),
                description: self.description.trim().to_string(),
                amount: round_cents(self.amount),
                status: self.status,
                note: self.note,
                related_party_id: self.related_party_id,
            },
            due_date: self.due_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: MovementStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettlePaymentPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Fornecedor XYZ")]
    pub counterparty: String,

    #[schema(example = "350.00")]
    pub amount: Decimal,

    pub related_party_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovementListQuery {
    /// Busca por descrição ou categoria
    pub search: Option<String>,
}
