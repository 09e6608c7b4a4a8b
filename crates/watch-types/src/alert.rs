use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Error,
    Critical,
}

/// Operational alert raised on a vault or on a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Alert {
    pub level: AlertLevel,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "isDismissed", alias = "dismissed")]
    pub dismissed: bool,
}

impl Alert {
    pub const fn is_visible(&self, include_dismissed: bool) -> bool {
        include_dismissed || !self.dismissed
    }
}
