//! Storage error types.

use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// No value stored under the key
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Conditional create hit an existing key
    #[error("Key already exists: {0}")]
    AlreadyExists(String),

    /// Invalid column family
    #[error("Invalid column family: {0}")]
    InvalidColumnFamily(String),
}

impl StorageError {
    /// Whether this error only reports a missing key
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
