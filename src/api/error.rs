//! API Error Types
//!
//! Errors surfaced by calls to the analytics API.

use thiserror::Error;

/// Fallback message when a login failure carries no detail
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Errors that can occur when talking to the analytics API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The token is missing, expired or rejected (HTTP 401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Login was refused; carries the message to show the user
    #[error("{0}")]
    LoginRejected(String),

    /// Any other non-success status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Analytics API unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The token could not be persisted
    #[error("Session error: {0}")]
    Session(#[from] crate::session::SessionError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Request(e)
        }
    }
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized");

        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error 500: boom");

        let err = ApiError::LoginRejected("Incorrect email or password".to_string());
        assert_eq!(err.to_string(), "Incorrect email or password");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::Timeout.is_unauthorized());
        assert!(!ApiError::Status {
            status: 403,
            message: String::new()
        }
        .is_unauthorized());
    }
}
