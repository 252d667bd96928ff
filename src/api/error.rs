//! Fetch Error Types
//!
//! Every dashboard request collapses to one of these. Loaders decide
//! whether a failure is surfaced (toast, inline message) or only logged.

use thiserror::Error;

/// Why a dashboard request produced no data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Backend could not be reached
    #[error("Dashboard API unavailable: {0}")]
    Unavailable(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other transport-level failure (TLS, body read, redirect loop)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response, regardless of body
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not JSON of the expected shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl LoadError {
    /// Whether the failure happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LoadError::Unavailable(_) | LoadError::Timeout | LoadError::Transport(_)
        )
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LoadError::Timeout
        } else if err.is_connect() {
            LoadError::Unavailable(err.to_string())
        } else {
            LoadError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Decode(err.to_string())
    }
}

/// Result type for dashboard requests
pub type ApiResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error 500: boom");
        assert!(!err.is_transport());
        assert!(LoadError::Timeout.is_transport());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: LoadError = json_err.into();
        assert!(matches!(err, LoadError::Decode(_)));
    }
}
