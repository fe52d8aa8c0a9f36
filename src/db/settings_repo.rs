// src/db/settings_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::{
    common::error::AppError,
    db::store::SettingsStore,
    models::{
        pricing::PricingDefaults,
        settings::{NotificationSettings, SettingsRecord},
    },
};

// Linha crua da tabela company_settings
#[derive(Debug, FromRow)]
struct SettingsRow {
    fuel_per_day: Decimal,
    toll_per_day: Decimal,
    meal_per_person: Decimal,
    hourly_rate: Decimal,
    notification_window_days: i32,
    alerts_enabled: bool,
    updated_at: Option<DateTime<Utc>>,
}

impl From<SettingsRow> for SettingsRecord {
    fn from(row: SettingsRow) -> Self {
        SettingsRecord {
            pricing: PricingDefaults {
                fuel_per_day: row.fuel_per_day,
                toll_per_day: row.toll_per_day,
                meal_per_person: row.meal_per_person,
                hourly_rate: row.hourly_rate,
            },
            notifications: NotificationSettings {
                window_days: u32::try_from(row.notification_window_days).unwrap_or(0),
                alerts_enabled: row.alerts_enabled,
            },
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn get(&self) -> Result<SettingsRecord, AppError> {
        // Registro ainda não salvo = padrões da empresa
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT fuel_per_day, toll_per_day, meal_per_person, hourly_rate,
                   notification_window_days, alerts_enabled, updated_at
            FROM company_settings
            WHERE id = 1
            "#,
        )
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SettingsRecord::from).unwrap_or_default())
    }

    async fn update_pricing(&self, defaults: PricingDefaults) -> Result<SettingsRecord, AppError> {
        // UPSERT (Insert or Update) do registro único
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO company_settings (id, fuel_per_day, toll_per_day, meal_per_person, hourly_rate, updated_at)
            VALUES (1, $1, $2, $3, $4, NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                fuel_per_day = EXCLUDED.fuel_per_day,
                toll_per_day = EXCLUDED.toll_per_day,
                meal_per_person = EXCLUDED.meal_per_person,
                hourly_rate = EXCLUDED.hourly_rate,
                updated_at = NOW()
            RETURNING fuel_per_day, toll_per_day, meal_per_person, hourly_rate,
                      notification_window_days, alerts_enabled, updated_at
            "#,
        )
            .bind(defaults.fuel_per_day)
            .bind(defaults.toll_per_day)
            .bind(defaults.meal_per_person)
            .bind(defaults.hourly_rate)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn update_notifications(
        &self,
        notifications: NotificationSettings,
    ) -> Result<SettingsRecord, AppError> {
        let window = i32::try_from(notifications.window_days)
            .map_err(|_| AppError::InvalidInput("windowDays".into()))?;

        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO company_settings (id, notification_window_days, alerts_enabled, updated_at)
            VALUES (1, $1, $2, NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                notification_window_days = EXCLUDED.notification_window_days,
                alerts_enabled = EXCLUDED.alerts_enabled,
                updated_at = NOW()
            RETURNING fuel_per_day, toll_per_day, meal_per_person, hourly_rate,
                      notification_window_days, alerts_enabled, updated_at
            "#,
        )
            .bind(window)
            .bind(notifications.alerts_enabled)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }
}
