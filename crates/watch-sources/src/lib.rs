pub mod client;
pub mod config;
pub mod error;
pub mod refresher;
pub mod risk_groups;
pub mod store;
pub mod task;
pub mod vaults;

pub use config::{SourceEndpoints, SourcesConfig};
pub use error::SourceError;
pub use refresher::{RefreshOutcome, SnapshotRefresher};
pub use risk_groups::{RiskGroupClient, RiskGroupSource};
pub use store::{Snapshot, SnapshotStore};
pub use task::RefreshTask;
pub use vaults::{HttpVaultSource, VaultSource};
