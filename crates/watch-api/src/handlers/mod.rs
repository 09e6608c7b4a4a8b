pub mod alerts;
pub mod config;
pub mod risk;
pub mod vaults;

pub use alerts::list_alerts;
pub use config::get_config;
pub use risk::get_risk_groups;
pub use vaults::{get_strategy_reports, get_vault_allocations, list_vaults};
