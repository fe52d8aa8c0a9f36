// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::pricing::PricingDefaults;

pub const DEFAULT_NOTIFICATION_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    // Quantos dias à frente o alerta de vencimentos olha
    #[schema(example = 7)]
    pub window_days: u32,
    pub alerts_enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_NOTIFICATION_WINDOW_DAYS,
            alerts_enabled: true,
        }
    }
}

/// Registro único de configurações da empresa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    pub pricing: PricingDefaults,
    pub notifications: NotificationSettings,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationsPayload {
    #[validate(range(max = 365, message = "window_out_of_range"))]
    #[schema(example = 7)]
    pub window_days: u32,
    pub alerts_enabled: bool,
}
