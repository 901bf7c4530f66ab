use thiserror::Error;

/// Error type for infrastructure failures (storage, config, report export).
///
/// Not-found, duplicate, and nothing-to-clear outcomes never appear here:
/// the trek store resolves those into signals and leaves state untouched.
#[derive(Debug, Error)]
pub enum TrekError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TrekError>;
