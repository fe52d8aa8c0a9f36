// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Pricing ---
        handlers::pricing::quote,

        // --- Proposals ---
        handlers::proposals::save_proposal,
        handlers::proposals::list_proposals,
        handlers::proposals::get_proposal,
        handlers::proposals::attach_pdf,

        // --- Finance ---
        handlers::finance::create_movement,
        handlers::finance::list_movements,
        handlers::finance::update_movement,
        handlers::finance::update_status,
        handlers::finance::delete_movement,
        handlers::finance::settle_payment,
        handlers::finance::get_summary,

        // --- Dashboard ---
        handlers::dashboard::get_alerts,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_pricing_defaults,
        handlers::settings::update_notifications,
    ),
    components(
        schemas(
            // --- PRICING ---
            models::pricing::AdjustmentKind,
            models::pricing::AdjustmentMode,
            models::pricing::PricingDefaults,
            models::pricing::PricingBreakdown,
            models::pricing::PricingQuoteRequest,
            models::pricing::PricingQuote,

            // --- PROPOSALS ---
            models::proposal::ProposalStatus,
            models::proposal::Proposal,
            models::proposal::ProposalUpsert,
            models::proposal::SaveProposalPayload,
            models::proposal::AttachPdfPayload,

            // --- FINANCE ---
            models::finance::MovementKind,
            models::finance::MovementStatus,
            models::finance::FinancialMovement,
            models::finance::FinancialSummary,
            models::finance::PaymentSettlement,
            models::finance::CreateMovementPayload,
            models::finance::UpdateMovementPayload,
            models::finance::UpdateStatusPayload,
            models::finance::SettlePaymentPayload,

            // --- DASHBOARD ---
            models::dashboard::DueAlerts,

            // --- Settings ---
            models::settings::NotificationSettings,
            models::settings::SettingsRecord,
            models::settings::UpdateNotificationsPayload,
        )
    ),
    tags(
        (name = "Pricing", description = "Calculadora de Orçamentos"),
        (name = "Proposals", description = "Orçamentos Salvos"),
        (name = "Finance", description = "Lançamentos, Parcelas e Pagamentos"),
        (name = "Dashboard", description = "Alertas de Vencimento"),
        (name = "Settings", description = "Configurações da Empresa")
    )
)]
pub struct ApiDoc;
