//! Pure computations over a vault snapshot: risk group scoring, allocation
//! breakdowns, search, alert filtering and report statistics.

pub mod alerts;
pub mod allocation;
pub mod error;
pub mod reports;
pub mod risk_groups;
pub mod score;
pub mod search;
pub mod sort;

pub use alerts::{AlertQuery, AlertSubject, collect_alerts, toggle_level};
pub use allocation::{Allocation, ProtocolAllocation, compute_allocation, strategy_pct};
pub use error::AnalyticsError;
pub use reports::{average_apr_pct, latest_reports, median_apr_pct};
pub use risk_groups::{
    DEFAULT_RISK_SORT, RiskColumn, aggregate_risk_groups, compare_groups, criteria_url_params,
    definitions_for_network, strategy_in_group,
};
pub use score::{LONGEVITY_SENTINEL, RiskScoring, ScoreTables, Threshold, ThresholdTable, median};
pub use search::{VaultFilter, VaultSearch, filter_vaults, matches_strategy, matches_vault};
pub use sort::{SortDirection, SortKey, SortState};
