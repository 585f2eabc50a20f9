//! In-memory storage implementation.
//!
//! Used by tests that need a store without a RocksDB directory.
//! Values go through the same bincode codec as the RocksDB backend.

use crate::{
    column_families::all_column_families,
    errors::{Result, StorageError},
    traits::{deserialize_value, serialize_value, Storage},
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

type ColumnFamily = BTreeMap<String, Vec<u8>>;

/// In-memory storage implementation
pub struct MemoryStorage {
    families: RwLock<HashMap<String, ColumnFamily>>,
}

impl MemoryStorage {
    /// Create an empty store with all column families registered
    pub fn new() -> Self {
        let families = all_column_families()
            .into_iter()
            .map(|cf| (cf.to_string(), ColumnFamily::new()))
            .collect();

        Self {
            families: RwLock::new(families),
        }
    }

    /// Number of values stored in a column family
    pub async fn count(&self, cf: &str) -> Result<usize> {
        let families = self.families.read().await;
        families
            .get(cf)
            .map(BTreeMap::len)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn fetch<V>(&self, cf: &str, key: &str) -> Result<V>
    where
        V: DeserializeOwned + Send,
    {
        let families = self.families.read().await;
        let family = families
            .get(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;

        match family.get(key) {
            Some(bytes) => deserialize_value(bytes),
            None => Err(StorageError::NotFound(key.to_string())),
        }
    }

    async fn save<V>(&self, cf: &str, key: &str, value: &V) -> Result<()>
    where
        V: Serialize + Send + Sync,
    {
        let value_bytes = serialize_value(value)?;
        let mut families = self.families.write().await;
        let family = families
            .get_mut(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;

        family.insert(key.to_string(), value_bytes);
        Ok(())
    }

    async fn create<V>(&self, cf: &str, key: &str, value: &V) -> Result<()>
    where
        V: Serialize + Send + Sync,
    {
        let value_bytes = serialize_value(value)?;
        let mut families = self.families.write().await;
        let family = families
            .get_mut(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;

        if family.contains_key(key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        family.insert(key.to_string(), value_bytes);
        Ok(())
    }

    async fn scan_all<V>(&self, cf: &str) -> Result<Vec<(String, V)>>
    where
        V: DeserializeOwned + Send,
    {
        let families = self.families.read().await;
        let family = families
            .get(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;

        family
            .iter()
            .map(|(key, bytes)| deserialize_value(bytes).map(|value| (key.clone(), value)))
            .collect()
    }
}
