// src/handlers/pricing.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::pricing::{PricingQuote, PricingQuoteRequest},
};

// POST /api/pricing/quote
#[utoipa::path(
    post,
    path = "/api/pricing/quote",
    tag = "Pricing",
    request_body = PricingQuoteRequest,
    responses(
        (status = 200, description = "Total calculado e valores intermediários", body = PricingQuote),
        (status = 400, description = "Valor negativo em algum campo")
    )
)]
pub async fn quote(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<PricingQuoteRequest>,
) -> Result<impl IntoResponse, ApiError> {

    let quote = app_state.pricing_service
        .quote(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(quote)))
}
