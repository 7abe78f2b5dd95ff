//! Error type shared by the theme and scroll controllers and the host bridge.

/// Failures surfaced by page chrome operations.
#[derive(Debug, thiserror::Error)]
pub enum ChromeError {
    #[error("element not found: #{id}")]
    MissingElement { id: String },
    #[error("local storage is unavailable")]
    StorageUnavailable,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("dom error: {0}")]
    Dom(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
