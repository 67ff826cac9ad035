//! API Error Type
//!
//! The backend reports failures as plain response text. Every failure the
//! client can hit (transport, authentication, validation, server fault)
//! collapses into one "request failed" error carrying that text; callers
//! surface the message and move on.

use thiserror::Error;

/// A failed backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// Raw response body text, or a status/transport description when the
    /// body could not be read
    pub message: String,
}

impl ApiError {
    /// Create an error from the backend's response text
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
