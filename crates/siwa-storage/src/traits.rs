//! Storage trait definitions.

use crate::errors::{Result, StorageError};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Keyed record store.
///
/// Keys are plain strings scoped by column family; values are serialized
/// with bincode.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Returns
    ///
    /// `Err(StorageError::NotFound)` if nothing is stored under the key
    async fn fetch<V>(&self, cf: &str, key: &str) -> Result<V>
    where
        V: DeserializeOwned + Send;

    /// Store `value` under `key`, replacing any previous value
    async fn save<V>(&self, cf: &str, key: &str, value: &V) -> Result<()>
    where
        V: Serialize + Send + Sync;

    /// Store `value` under `key` only if the key is absent.
    ///
    /// The check and the write are atomic with respect to other `create`
    /// and `save` calls on the same store.
    ///
    /// # Returns
    ///
    /// `Err(StorageError::AlreadyExists)` if the key is already present
    async fn create<V>(&self, cf: &str, key: &str, value: &V) -> Result<()>
    where
        V: Serialize + Send + Sync;

    /// All key-value pairs in a column family, ordered by key
    async fn scan_all<V>(&self, cf: &str) -> Result<Vec<(String, V)>>
    where
        V: DeserializeOwned + Send;
}

/// Helper function to serialize a value
pub(crate) fn serialize_value<V: Serialize>(value: &V) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Helper function to deserialize a value
pub(crate) fn deserialize_value<V: DeserializeOwned>(bytes: &[u8]) -> Result<V> {
    bincode::deserialize(bytes).map_err(|e| StorageError::Deserialization(e.to_string()))
}

/// Helper function to decode a stored key
pub(crate) fn decode_key(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| StorageError::Deserialization(e.to_string()))
}
