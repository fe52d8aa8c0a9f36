pub mod pricing_service;

pub mod proposal_service;

pub mod finance_service;
pub mod dashboard_service;
pub mod settings_service;

pub use dashboard_service::DashboardService;
pub use finance_service::FinanceService;
pub use pricing_service::PricingService;
pub use proposal_service::ProposalService;
pub use settings_service::SettingsService;
