use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("failed to serialize dashboard: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write dashboard: {0}")]
    Io(#[from] std::io::Error),
}
