use thiserror::Error;
use watch_metrics::FetchOutcome;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("All {attempted} risk group endpoints failed")]
    AllEndpointsFailed { attempted: usize },
}

impl SourceError {
    /// Metric label for a failed fetch.
    pub const fn outcome(&self) -> FetchOutcome {
        match self {
            Self::UnexpectedStatus { .. } => FetchOutcome::HttpStatus,
            Self::JsonError(_) => FetchOutcome::InvalidBody,
            Self::ClientBuild(_)
            | Self::InvalidUrl(_)
            | Self::HttpError(_)
            | Self::AllEndpointsFailed { .. } => FetchOutcome::Transport,
        }
    }
}
