#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid score table {table}: {reason}")]
    InvalidScoreTable { table: &'static str, reason: String },
}
