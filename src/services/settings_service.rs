// src/services/settings_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::SettingsStore,
    models::{
        pricing::PricingDefaults,
        settings::{NotificationSettings, SettingsRecord},
    },
    services::pricing_service::validate_defaults,
};

pub const MAX_NOTIFICATION_WINDOW_DAYS: u32 = 365;

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    pub async fn get_settings(&self) -> Result<SettingsRecord, AppError> {
        self.store.get().await
    }

    pub async fn update_pricing_defaults(
        &self,
        defaults: PricingDefaults,
    ) -> Result<SettingsRecord, AppError> {
        validate_defaults(&defaults)?;
        let record = self.store.update_pricing(defaults).await?;
        tracing::info!("⚙️ Valores padrão de orçamento atualizados");
        Ok(record)
    }

    pub async fn update_notifications(
        &self,
        notifications: NotificationSettings,
    ) -> Result<SettingsRecord, AppError> {
        if notifications.window_days > MAX_NOTIFICATION_WINDOW_DAYS {
            return Err(AppError::InvalidInput(format!(
                "janela de alertas deve ficar entre 0 e {} dias",
                MAX_NOTIFICATION_WINDOW_DAYS
            )));
        }
        self.store.update_notifications(notifications).await
    }
}
