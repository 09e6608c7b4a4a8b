pub mod alert;
pub mod de;
pub mod risk;
pub mod vault;

pub use alert::{Alert, AlertLevel};
pub use risk::{MatchedStrategy, RiskCriteria, RiskGroupDefinition, RiskGroupResult};
pub use vault::{Strategy, StrategyDetails, StrategyReport, StrategyVaultRef, Token, Vault};
