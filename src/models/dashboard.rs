// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::finance::FinancialMovement;

// Badge de alertas: pendentes que vencem dentro da janela configurada
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DueAlerts {
    pub alerts_enabled: bool,
    pub window_days: u32,
    pub movements: Vec<FinancialMovement>,
}
