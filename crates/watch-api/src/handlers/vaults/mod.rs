pub mod allocations;
pub mod list;
pub mod reports;

pub use allocations::get_vault_allocations;
pub use list::list_vaults;
pub use reports::get_strategy_reports;
