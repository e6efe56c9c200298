//! # Common Error Types
//!
//! Consolidated error handling for the client.
//!
//! ## Error Categories
//!
//! - **Api**: Backend API communication errors (see [`ApiError`])
//! - **Validation**: Input rejected before any request was sent
//! - **State**: Operation not allowed in the current application state
//! - **Persist**: Reading or writing the persisted state file
//! - **Config**: Invalid configuration
//!
//! Errors stored in slices are always rendered to a plain message: the
//! store never keeps typed errors around.

use thiserror::Error;

/// A failed backend call, collapsed to the message shown to the user.
///
/// `message` is the `message` field of the response body when the backend
/// sent one, otherwise the fallback chosen by the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, `None` when no response was received
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Transport failures, server errors and rate limiting are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self.status {
            None => true,
            Some(code) => code == 429 || code >= 500,
        }
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Persist error: {0}")]
    Persist(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Persist(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Persist(err.to_string())
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_bare_message() {
        let err = AppError::from(ApiError::new(Some(400), "Insufficient balance"));
        assert_eq!(err.to_string(), "Insufficient balance");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::new(None, "x").is_retryable());
        assert!(ApiError::new(Some(503), "x").is_retryable());
        assert!(ApiError::new(Some(429), "x").is_retryable());
        assert!(!ApiError::new(Some(400), "x").is_retryable());
        assert!(!ApiError::new(Some(401), "x").is_retryable());
    }

    #[test]
    fn test_validation_display() {
        let err = AppError::Validation("Amount must be greater than 0".to_string());
        assert_eq!(err.to_string(), "Validation error: Amount must be greater than 0");
    }
}
