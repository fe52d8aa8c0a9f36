// src/handlers/settings.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        pricing::PricingDefaults,
        settings::{NotificationSettings, SettingsRecord, UpdateNotificationsPayload},
    },
};

// GET /api/settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Configurações da empresa (ou os padrões, se nunca salvas)", body = SettingsRecord)
    )
)]
pub async fn get_settings(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let settings = app_state.settings_service
        .get_settings()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings/pricing
#[utoipa::path(
    put,
    path = "/api/settings/pricing",
    tag = "Settings",
    request_body = PricingDefaults,
    responses(
        (status = 200, description = "Valores padrão de orçamento salvos", body = SettingsRecord),
        (status = 400, description = "Valor negativo")
    )
)]
pub async fn update_pricing_defaults(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<PricingDefaults>,
) -> Result<impl IntoResponse, ApiError> {

    let updated = app_state.settings_service
        .update_pricing_defaults(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// PUT /api/settings/notifications
#[utoipa::path(
    put,
    path = "/api/settings/notifications",
    tag = "Settings",
    request_body = UpdateNotificationsPayload,
    responses(
        (status = 200, description = "Alertas configurados", body = SettingsRecord),
        (status = 400, description = "Janela fora de 0..=365 dias")
    )
)]
pub async fn update_notifications(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<UpdateNotificationsPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let notifications = NotificationSettings {
        window_days: payload.window_days,
        alerts_enabled: payload.alerts_enabled,
    };

    let updated = app_state.settings_service
        .update_notifications(notifications)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}
