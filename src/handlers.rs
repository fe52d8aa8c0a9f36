pub mod pricing;
pub mod proposals;
pub mod finance;
pub mod dashboard;
pub mod settings;
