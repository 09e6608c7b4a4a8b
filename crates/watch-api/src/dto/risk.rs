use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use watch_types::RiskGroupResult;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RiskGroupsDTO {
    pub network: u64,
    /// Applied sort in its string form
    pub sort: String,
    pub groups: Vec<RiskGroupResult>,
}
