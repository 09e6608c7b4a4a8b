use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConfigDTO {
    pub network: u64,
    pub repository_url: Option<String>,
    pub vaults_updated_at: Option<DateTime<Utc>>,
    pub risk_groups_updated_at: Option<DateTime<Utc>>,
}
