pub mod dashboard;
pub mod finance;
pub mod pricing;
pub mod proposal;
pub mod settings;
