//! Error types for masking and secret derivation.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;

/// Errors that can occur while deriving secrets or parsing values.
///
/// Masking itself is total over [`crate::Value`] and never produces one of
/// these.
#[derive(Error, Debug)]
pub enum RedactionError {
    /// A caller-supplied argument was rejected (empty secret, zero width,
    /// malformed hex or decimal literal).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The key-derivation function rejected its parameters or output length.
    #[error("key derivation error: {0}")]
    Kdf(String),

    /// The operating system random source failed.
    #[error("random source error: {0}")]
    Random(String),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RedactionError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RedactionError::InvalidArgument(msg.into())
    }
}
