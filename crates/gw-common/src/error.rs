//! Error types for request handlers.
//!
//! Every error maps to a four-digit application code whose leading three
//! digits are the HTTP status returned to the caller:
//! - 4000: request body is not valid JSON
//! - 4001: request parameters failed to load
//! - 4002: invalid argument to a helper
//! - 5000: internal failure (serialization, key derivation, clock)

use crate::response::ApiResponse;
use std::fmt;
use thiserror::Error;

/// Result type alias for handler helpers.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for gw-common.
#[derive(Error, Debug)]
pub enum Error {
    #[error("response code {0} has fewer than three digits")]
    InvalidCode(u32),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("timestamp out of range: {0}")]
    Timestamp(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Redaction(#[from] gw_redact::RedactionError),
}

impl Error {
    /// The application code reported to the caller.
    pub fn code(&self) -> u32 {
        match self {
            Error::MalformedBody(_) => 4000,
            Error::InvalidRequest(_) => 4001,
            Error::InvalidArgument(_) => 4002,
            Error::Redaction(gw_redact::RedactionError::InvalidArgument(_)) => 4002,
            Error::InvalidCode(_)
            | Error::Timestamp(_)
            | Error::Json(_)
            | Error::Redaction(_) => 5000,
        }
    }

    /// Message safe to return to the caller.
    ///
    /// Internal failures fall back to the status's default message.
    pub fn public_message(&self) -> String {
        match self.code() {
            5000 => String::new(),
            _ => self.to_string(),
        }
    }

    /// Convert into a response envelope.
    pub fn into_response(self) -> ApiResponse {
        ApiResponse::new(self.code()).message(self.public_message())
    }
}

/// An application error a handler raises to end the request with a
/// specific code and message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CommonError {
    pub code: u32,
    pub message: String,
}

impl CommonError {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// An error with only a code; the message comes from the status table.
    pub fn with_code(code: u32) -> Self {
        Self::new(code, "")
    }

    pub fn into_response(self) -> ApiResponse {
        ApiResponse::new(self.code).message(self.message)
    }
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {}", self.code)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for CommonError {}

impl From<Error> for CommonError {
    fn from(err: Error) -> Self {
        CommonError::new(err.code(), err.public_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::MalformedBody("x".into()).code(), 4000);
        assert_eq!(Error::InvalidRequest("x".into()).code(), 4001);
        assert_eq!(Error::InvalidArgument("x".into()).code(), 4002);
        assert_eq!(Error::InvalidCode(7).code(), 5000);
        assert_eq!(
            Error::Redaction(gw_redact::RedactionError::InvalidArgument("x".into())).code(),
            4002
        );
        assert_eq!(
            Error::Redaction(gw_redact::RedactionError::Kdf("x".into())).code(),
            5000
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = Error::Timestamp("overflow at 9223372036854775807".into());
        assert_eq!(err.public_message(), "");
        let err = Error::InvalidRequest("missing field `email`".into());
        assert!(err.public_message().contains("email"));
    }

    #[test]
    fn test_common_error_display() {
        assert_eq!(CommonError::new(4041, "no user").to_string(), "error 4041: no user");
        assert_eq!(CommonError::with_code(4090).to_string(), "error 4090");
    }

    #[test]
    fn test_common_error_from_error() {
        let err: CommonError = Error::MalformedBody("EOF".into()).into();
        assert_eq!(err.code, 4000);
        assert!(err.message.contains("EOF"));
    }
}
