// src/handlers/proposals.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::proposal::{AttachPdfPayload, Proposal, ProposalUpsert, SaveProposalPayload},
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProposalListQuery {
    /// Filtra pelos orçamentos de um cliente
    pub client_id: Option<Uuid>,
}

// POST /api/proposals
#[utoipa::path(
    post,
    path = "/api/proposals",
    tag = "Proposals",
    request_body = SaveProposalPayload,
    responses(
        (status = 201, description = "Orçamento criado", body = ProposalUpsert),
        (status = 200, description = "Orçamento idêntico já existia; id reaproveitado", body = ProposalUpsert),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn save_proposal(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SaveProposalPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (key, fields) = payload.into_parts();

    let saved = app_state.proposal_service
        .upsert(key, fields)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let status = if saved.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(saved)))
}

// GET /api/proposals
#[utoipa::path(
    get,
    path = "/api/proposals",
    tag = "Proposals",
    params(ProposalListQuery),
    responses(
        (status = 200, description = "Orçamentos, do mais recente ao mais antigo", body = Vec<Proposal>)
    )
)]
pub async fn list_proposals(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ProposalListQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let proposals = app_state.proposal_service
        .list(query.client_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(proposals)))
}

// GET /api/proposals/{id}
#[utoipa::path(
    get,
    path = "/api/proposals/{id}",
    tag = "Proposals",
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento", body = Proposal),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn get_proposal(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {

    let proposal = app_state.proposal_service
        .get(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(proposal)))
}

// PUT /api/proposals/{id}/pdf
#[utoipa::path(
    put,
    path = "/api/proposals/{id}/pdf",
    tag = "Proposals",
    request_body = AttachPdfPayload,
    params(("id" = Uuid, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Link do PDF gravado", body = Proposal),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn attach_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<AttachPdfPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let proposal = app_state.proposal_service
        .attach_pdf(id, &payload.pdf_url)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(proposal)))
}
