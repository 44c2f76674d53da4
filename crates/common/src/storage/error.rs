//! Credential store error types

use thiserror::Error;

/// Credential store error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result alias for credential store operations
pub type StoreResult<T> = Result<T, StoreError>;
