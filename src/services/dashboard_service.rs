// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::{
    common::error::AppError,
    db::{MovementStore, SettingsStore},
    models::{
        dashboard::DueAlerts,
        finance::{FinancialMovement, MovementStatus},
    },
};

/// Pendentes com vencimento em `[today, today + window_days]`, do mais próximo
/// ao mais distante. Vencidos antes de hoje não entram.
pub fn due_alerts(
    movements: &[FinancialMovement],
    today: NaiveDate,
    window_days: u32,
) -> Vec<FinancialMovement> {
    let limit = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut due: Vec<FinancialMovement> = movements
        .iter()
        .filter(|m| m.status == MovementStatus::Pending)
        .filter(|m| m.due_date >= today && m.due_date <= limit)
        .cloned()
        .collect();

    due.sort_by_key(|m| m.due_date);
    due
}

#[derive(Clone)]
pub struct DashboardService {
    movements: Arc<dyn MovementStore>,
    settings: Arc<dyn SettingsStore>,
}

impl DashboardService {
    pub fn new(movements: Arc<dyn MovementStore>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { movements, settings }
    }

    pub async fn alerts(&self, today: NaiveDate) -> Result<DueAlerts, AppError> {
        let notifications = self.settings.get().await?.notifications;

        if !notifications.alerts_enabled {
            return Ok(DueAlerts {
                alerts_enabled: false,
                window_days: notifications.window_days,
                movements: Vec::new(),
            });
        }

        let limit = today
            .checked_add_days(Days::new(u64::from(notifications.window_days)))
            .unwrap_or(NaiveDate::MAX);
        let candidates = self.movements.list_pending_due_between(today, limit).await?;

        Ok(DueAlerts {
            alerts_enabled: true,
            window_days: notifications.window_days,
            movements: due_alerts(&candidates, today, notifications.window_days),
        })
    }
}
