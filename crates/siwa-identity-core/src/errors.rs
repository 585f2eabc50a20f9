//! Identity Core error types.

use thiserror::Error;

/// Identity Core errors
#[derive(Debug, Error)]
pub enum IdentityCoreError {
    /// Provider user id is empty
    #[error("Invalid provider user id: must not be empty")]
    InvalidProviderUserId,

    /// No record stored for the provider user id
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] siwa_storage::StorageError),
}

/// Result type for Identity Core operations
pub type Result<T> = std::result::Result<T, IdentityCoreError>;
