use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::alert::Alert;

/// Withdrawal queue position reported for strategies that are not in the queue.
pub const NOT_IN_QUEUE_POSITION: i64 = 21;

/// Underlying token of a vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Token {
    pub address: String,
    pub name: String,
    pub display_name: String,
    pub symbol: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Vault {
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub decimals: u32,
    /// Block explorer base URL.
    #[serde(default)]
    pub explorer: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub token: Token,
    #[serde(default)]
    pub strategies: Vec<Strategy>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl Vault {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    pub fn strategy(&self, address: &str) -> Option<&Strategy> {
        self.strategies
            .iter()
            .find(|s| s.address.eq_ignore_ascii_case(address))
    }
}

/// Back-reference from a strategy to the vault that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategyVaultRef {
    pub address: String,
    pub underlying_token_symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Strategy {
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vault: StrategyVaultRef,
    #[serde(default)]
    pub details: StrategyDetails,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub reports: Vec<StrategyReport>,
}

impl Strategy {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// Description with the `{{token}}` placeholder replaced by the vault's
    /// underlying token symbol.
    pub fn description_for_display(&self) -> String {
        self.description
            .replace("{{token}}", &self.vault.underlying_token_symbol)
    }
}

/// On-chain parameters of a strategy. Raw token amounts are kept as decimal
/// strings in the token's base unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategyDetails {
    /// Share of the vault's assets in basis points (0..=10000).
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub debt_ratio: u64,
    pub total_debt: String,
    #[serde(rename = "totalDebtUSDC", deserialize_with = "crate::de::null_as_default")]
    pub total_debt_usdc: f64,
    pub credit_available: String,
    pub estimated_total_assets: String,
    /// Annualised rate as a fraction.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub apr: f64,
    /// Unix seconds.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub activation: u64,
    /// Unix seconds.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub last_report: u64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub protocols: Vec<String>,
    pub should_do_health_check: bool,
    pub addr_health_check: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub withdrawal_queue_position: i64,
}

impl StrategyDetails {
    /// Withdrawal queue index, -1 when the strategy is not in the queue.
    pub const fn queue_index(&self) -> i64 {
        if self.withdrawal_queue_position == NOT_IN_QUEUE_POSITION {
            -1
        } else {
            self.withdrawal_queue_position
        }
    }
}

/// Harvest report of a strategy. Immutable once recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategyReport {
    pub id: String,
    /// Unix milliseconds.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub timestamp: u64,
    pub debt_added: String,
    pub debt_limit: String,
    pub total_debt: String,
    pub gain: String,
    pub total_gain: String,
    pub loss: String,
    pub total_loss: String,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub duration: u64,
    #[serde(rename = "durationPR", deserialize_with = "crate::de::null_as_default")]
    pub duration_pr: f64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub apr: f64,
    pub debt_paid: String,
}

impl StrategyReport {
    /// Transaction hash part of the report id (`<hash>-<log index>`).
    pub fn tx_hash(&self) -> &str {
        self.id.split('-').next().unwrap_or_default()
    }
}
