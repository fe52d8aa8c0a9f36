// src/routes.rs

use axum::{
    routing::{get, patch, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o router completo. Separado do `main` para os testes usarem o mesmo app.
pub fn app(app_state: AppState) -> Router {
    let pricing_routes = Router::new()
        .route("/quote", post(handlers::pricing::quote));

    let proposal_routes = Router::new()
        .route("/"
               ,post(handlers::proposals::save_proposal)
               .get(handlers::proposals::list_proposals)
        )
        .route("/{id}", get(handlers::proposals::get_proposal))
        .route("/{id}/pdf", put(handlers::proposals::attach_pdf));

    let finance_routes = Router::new()
        .route("/movements"
               ,post(handlers::finance::create_movement)
               .get(handlers::finance::list_movements)
        )
        .route("/movements/{id}"
               ,put(handlers::finance::update_movement)
               .delete(handlers::finance::delete_movement)
        )
        .route("/movements/{id}/status", patch(handlers::finance::update_status))
        .route("/payments", post(handlers::finance::settle_payment))
        .route("/summary", get(handlers::finance::get_summary));

    let settings_routes = Router::new()
        .route("/", get(handlers::settings::get_settings))
        .route("/pricing", put(handlers::settings::update_pricing_defaults))
        .route("/notifications", put(handlers::settings::update_notifications));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api/dashboard/alerts", get(handlers::dashboard::get_alerts))
        .nest("/api/pricing", pricing_routes)
        .nest("/api/proposals", proposal_routes)
        .nest("/api/finance", finance_routes)
        .nest("/api/settings", settings_routes)
        .with_state(app_state)
}
