//! Error types for emergence-scenarios.

use thiserror::Error;

/// Result type for scenario operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, saving or decoding scenarios.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A share-link fragment could not be decoded
    #[error("Malformed share state: {0}")]
    MalformedShareState(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::MalformedShareState(e.to_string())
    }
}
