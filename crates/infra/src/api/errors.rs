//! API-specific error types
//!
//! Provides error classification for API operations. Nothing here carries
//! retry metadata: the only recovery path is the one-shot credential refresh
//! inside [`super::ApiClient`].

use blogc_common::storage::StoreError;
use reqwest::StatusCode;
use thiserror::Error;

use super::refresh::RefreshFailure;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403, failed refresh)
    Authentication,
    /// Client errors (4xx except auth, bad request descriptors)
    Client,
    /// Server errors (5xx, undecodable bodies)
    Server,
    /// Network/connection errors
    Network,
    /// Credential store failures
    Storage,
    /// Configuration errors
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: StatusCode, url: String, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("Credential refresh failed: {0}")]
    Refresh(#[from] RefreshFailure),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Status { status, .. } => {
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN {
                    ApiErrorCategory::Authentication
                } else if status.is_server_error() {
                    ApiErrorCategory::Server
                } else {
                    ApiErrorCategory::Client
                }
            }
            Self::Decode(_) => ApiErrorCategory::Server,
            Self::InvalidRequest(_) => ApiErrorCategory::Client,
            Self::Store(_) => ApiErrorCategory::Storage,
            Self::Refresh(_) => ApiErrorCategory::Authentication,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status of the failed response, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Whether the server answered with exactly 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode) -> ApiError {
        ApiError::Status { status, url: "https://api.example.com/v1/posts/".into(), body: String::new() }
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(status_error(StatusCode::UNAUTHORIZED).category(), ApiErrorCategory::Authentication);
        assert_eq!(status_error(StatusCode::FORBIDDEN).category(), ApiErrorCategory::Authentication);
        assert_eq!(status_error(StatusCode::BAD_GATEWAY).category(), ApiErrorCategory::Server);
        assert_eq!(status_error(StatusCode::NOT_FOUND).category(), ApiErrorCategory::Client);
        assert_eq!(
            ApiError::Store(StoreError::Backend("x".into())).category(),
            ApiErrorCategory::Storage
        );
        assert_eq!(
            ApiError::Refresh(RefreshFailure::NoRefreshToken).category(),
            ApiErrorCategory::Authentication
        );
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(status_error(StatusCode::UNAUTHORIZED).is_unauthorized());
        assert!(!status_error(StatusCode::FORBIDDEN).is_unauthorized());
        assert!(!ApiError::Decode("bad".into()).is_unauthorized());
    }

    #[test]
    fn test_status_message_names_url() {
        let message = status_error(StatusCode::UNAUTHORIZED).to_string();
        assert!(message.contains("https://api.example.com/v1/posts/"));
        assert!(message.contains("401"));
    }
}
