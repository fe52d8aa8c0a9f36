pub mod store;
pub use store::{MovementStore, ProposalStore, SettingsStore};
pub mod proposal_repo;
pub use proposal_repo::ProposalRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod memory_store;
pub use memory_store::MemoryStore;
