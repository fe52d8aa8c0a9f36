// src/models/proposal.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::money::round_cents;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "proposal_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProposalStatus {
    Generated,    // "Orçamento gerado"
    PdfGenerated, // "PDF Gerado"
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: Uuid,

    // Identificação (copiada do cliente / responsável selecionado)
    pub client_id: Uuid,
    #[schema(example = "Metalúrgica Exemplo Ltda")]
    pub client_name: String,
    #[schema(example = "Carlos Silva")]
    pub representative: String,
    #[schema(example = "Comercial")]
    pub department: String,

    // Texto livre
    pub scope_description: String,
    pub reference: String,
    pub objective: String,
    pub jps_responsibilities: Vec<String>,
    pub client_responsibilities: Vec<String>,

    #[schema(example = "4450.00")]
    pub total_value: Decimal,

    // Vazio = "A combinar"
    #[schema(value_type = Option<String>, format = Date, example = "2025-03-31")]
    pub deadline: Option<NaiveDate>,

    pub status: ProposalStatus,
    pub pdf_url: Option<String>,
    pub icon_url: Option<String>,

    #[schema(value_type = String, format = Date, example = "2025-03-01")]
    pub proposal_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Proposal {
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(self.client_id, self.total_value, self.deadline, &self.representative)
    }
}

/// Tupla que decide se um "salvar" reaproveita um orçamento existente.
/// Não é a identidade do registro: dois saves com a mesma tupla viram um só.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub client_id: Uuid,
    pub total_value: Decimal,
    pub deadline: Option<NaiveDate>,
    pub representative: String,
}

impl DedupKey {
    // O valor é arredondado aos centavos do mesmo jeito que a coluna NUMERIC(14,2)
    // (meio centavo para longe do zero), então o valor comparado é o valor gravado.
    pub fn new(
        client_id: Uuid,
        total_value: Decimal,
        deadline: Option<NaiveDate>,
        representative: &str,
    ) -> Self {
        Self {
            client_id,
            total_value: round_cents(total_value),
            deadline,
            representative: representative.trim().to_string(),
        }
    }
}

/// Campos descritivos do orçamento (fora da chave).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalFields {
    pub client_name: String,
    pub department: String,
    pub scope_description: String,
    pub reference: String,
    pub objective: String,
    pub jps_responsibilities: Vec<String>,
    pub client_responsibilities: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewProposal {
    pub id: Uuid,
    pub key: DedupKey,
    pub fields: ProposalFields,
    pub icon_url: Option<String>,
    pub proposal_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalUpsert {
    pub id: Uuid,
    // false = reaproveitou um orçamento idêntico já salvo
    pub created: bool,
}

// --- Payloads ---

pub const DEFAULT_REFERENCE: &str = "Prestação de serviços de montagem e manutenção industrial.";
pub const DEFAULT_OBJECTIVE: &str =
    "Esta proposta tem o objetivo de atender a solicitação para manutenção industrial.";

fn default_reference() -> String {
    DEFAULT_REFERENCE.to_string()
}

fn default_objective() -> String {
    DEFAULT_OBJECTIVE.to_string()
}

/// O formulário manda "" quando o prazo ainda não foi combinado.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveProposalPayload {
    pub client_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Metalúrgica Exemplo Ltda")]
    pub client_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Carlos Silva")]
    pub representative: String,

    #[serde(default)]
    pub department: String,

    #[serde(default)]
    pub scope_description: String,

    #[serde(default = "default_reference")]
    pub reference: String,

    #[serde(default = "default_objective")]
    pub objective: String,

    #[serde(default)]
    pub jps_responsibilities: Vec<String>,

    #[serde(default)]
    pub client_responsibilities: Vec<String>,

    #[schema(example = "4450.00")]
    pub total_value: Decimal,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[schema(value_type = Option<String>, format = Date, example = "2025-03-31")]
    pub deadline: Option<NaiveDate>,
}

impl SaveProposalPayload {
    pub fn into_parts(self) -> (DedupKey, ProposalFields) {
        let key = DedupKey::new(self.client_id, self.total_value, self.deadline, &self.representative);
        let fields = ProposalFields {
            client_name: self.client_name,
            department: self.department,
            scope_description: self.scope_description,
            reference: self.reference,
            objective: self.objective,
            jps_responsibilities: self.jps_responsibilities,
            client_responsibilities: self.client_responsibilities,
        };
        (key, fields)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachPdfPayload {
    #[validate(url(message = "invalid_url"))]
    #[schema(example = "https://drive.google.com/file/d/abc/view")]
    pub pdf_url: String,
}
