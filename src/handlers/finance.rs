// src/handlers/finance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::finance::{
        CreateMovementPayload, FinancialMovement, FinancialSummary, MovementListQuery,
        PaymentSettlement, SettlePaymentPayload, UpdateMovementPayload, UpdateStatusPayload,
    },
};

// =============================================================================
//  LANÇAMENTOS
// =============================================================================

// POST /api/finance/movements
#[utoipa::path(
    post,
    path = "/api/finance/movements",
    tag = "Finance",
    request_body = CreateMovementPayload,
    responses(
        (status = 201, description = "Lançamento (ou lote de parcelas) gravado", body = Vec<FinancialMovement>),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let movements = app_state.finance_service
        .create_movement(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(movements)))
}

// GET /api/finance/movements
#[utoipa::path(
    get,
    path = "/api/finance/movements",
    tag = "Finance",
    params(MovementListQuery),
    responses(
        (status = 200, description = "Lançamentos visíveis, por vencimento", body = Vec<FinancialMovement>)
    )
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<MovementListQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let today = Utc::now().date_naive();

    let movements = app_state.finance_service
        .list_movements(today, query.search.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(movements)))
}

// PUT /api/finance/movements/{id}
#[utoipa::path(
    put,
    path = "/api/finance/movements/{id}",
    tag = "Finance",
    request_body = UpdateMovementPayload,
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Lançamento atualizado", body = FinancialMovement),
        (status = 404, description = "Lançamento não encontrado")
    )
)]
pub async fn update_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let movement = app_state.finance_service
        .update_movement(id, payload.into_changes())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(movement)))
}

// PATCH /api/finance/movements/{id}/status
#[utoipa::path(
    patch,
    path = "/api/finance/movements/{id}/status",
    tag = "Finance",
    request_body = UpdateStatusPayload,
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Status alterado", body = FinancialMovement),
        (status = 404, description = "Lançamento não encontrado")
    )
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {

    let movement = app_state.finance_service
        .update_status(id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(movement)))
}

// DELETE /api/finance/movements/{id}
#[utoipa::path(
    delete,
    path = "/api/finance/movements/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 204, description = "Lançamento excluído"),
        (status = 404, description = "Lançamento não encontrado")
    )
)]
pub async fn delete_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    app_state.finance_service
        .delete_movement(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  PAGAMENTOS E RESUMO
// =============================================================================

// POST /api/finance/payments
#[utoipa::path(
    post,
    path = "/api/finance/payments",
    tag = "Finance",
    request_body = SettlePaymentPayload,
    responses(
        (status = 200, description = "Pagamento baixado", body = PaymentSettlement),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn settle_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SettlePaymentPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let settlement = app_state.finance_service
        .settle_payment(
            &payload.counterparty,
            payload.amount,
            payload.related_party_id,
            Utc::now().date_naive(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(settlement)))
}

// GET /api/finance/summary
#[utoipa::path(
    get,
    path = "/api/finance/summary",
    tag = "Finance",
    responses(
        (status = 200, description = "Entradas, saídas e saldo (sem cancelados)", body = FinancialSummary)
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let summary = app_state.finance_service
        .summary()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}
