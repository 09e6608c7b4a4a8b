use serde::Deserialize;
use utoipa::IntoParams;
use watch_types::AlertLevel;

pub const DEFAULT_REPORTS_LIMIT: usize = 50;
pub const MAX_REPORTS_LIMIT: usize = 200;

/// Query parameters for the vault list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VaultListQuery {
    /// Case-insensitive search over vault, token and strategy fields
    #[serde(default)]
    pub search: String,
    /// Only keep vaults carrying at least one alert
    #[serde(default)]
    pub only_with_alerts: bool,
}

/// Query parameters for strategy reports
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportsQuery {
    /// Number of reports to return (1-200, default: 50)
    pub limit: Option<usize>,
}

impl ReportsQuery {
    pub fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_REPORTS_LIMIT)
            .clamp(1, MAX_REPORTS_LIMIT)
    }
}

/// Query parameters for the alert list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlertsQuery {
    #[serde(default)]
    pub search: String,
    /// Only keep subjects with an alert of this level
    pub level: Option<AlertLevel>,
    /// Include dismissed alerts
    #[serde(default)]
    pub dismissed: bool,
}

/// Query parameters for risk groups
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RiskQuery {
    /// Chain id, defaults to the configured network. 0 disables the table.
    pub network: Option<u64>,
    /// `column` or `-column`, one of name, tvl, risk, likelihood, score.
    /// Empty keeps the published order.
    pub sort: Option<String>,
}
