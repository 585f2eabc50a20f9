//! RocksDB storage implementation.

use crate::{
    column_families::all_column_families,
    errors::{Result, StorageError},
    traits::{decode_key, deserialize_value, serialize_value, Storage},
};
use async_trait::async_trait;
use rocksdb::{Options, DB};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::debug;

/// RocksDB storage implementation
pub struct RocksDbStorage {
    db: Arc<DB>,
    /// Serializes writes so `create` can check and put without interleaving
    write_lock: Mutex<()>,
}

impl RocksDbStorage {
    /// Open RocksDB database at the specified path
    ///
    /// Creates all required column families if they don't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let db = DB::open_cf(&opts, &path, all_column_families())
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Opened RocksDB at {:?}", path.as_ref());

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get column family handle
    fn cf_handle(&self, cf: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))
    }

    fn put_locked(&self, cf: &str, key: &str, value_bytes: &[u8], overwrite: bool) -> Result<()> {
        let cf_handle = self.cf_handle(cf)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StorageError::Database(format!("write lock poisoned: {}", e)))?;

        if !overwrite {
            let existing = self
                .db
                .get_cf(cf_handle, key.as_bytes())
                .map_err(|e| StorageError::Database(e.to_string()))?;
            if existing.is_some() {
                return Err(StorageError::AlreadyExists(key.to_string()));
            }
        }

        self.db
            .put_cf(cf_handle, key.as_bytes(), value_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))
    }
}

#[async_trait]
impl Storage for RocksDbStorage {
    async fn fetch<V>(&self, cf: &str, key: &str) -> Result<V>
    where
        V: DeserializeOwned + Send,
    {
        let cf_handle = self.cf_handle(cf)?;

        let result = self
            .db
            .get_cf(cf_handle, key.as_bytes())
            .map_err(|e| StorageError::Database(e.to_string()))?;

        match result {
            Some(bytes) => deserialize_value(&bytes),
            None => Err(StorageError::NotFound(key.to_string())),
        }
    }

    async fn save<V>(&self, cf: &str, key: &str, value: &V) -> Result<()>
    where
        V: Serialize + Send + Sync,
    {
        let value_bytes = serialize_value(value)?;
        self.put_locked(cf, key, &value_bytes, true)
    }

    async fn create<V>(&self, cf: &str, key: &str, value: &V) -> Result<()>
    where
        V: Serialize + Send + Sync,
    {
        let value_bytes = serialize_value(value)?;
        self.put_locked(cf, key, &value_bytes, false)
    }

    async fn scan_all<V>(&self, cf: &str) -> Result<Vec<(String, V)>>
    where
        V: DeserializeOwned + Send,
    {
        let cf_handle = self.cf_handle(cf)?;

        let mut results = Vec::new();
        let iter = self.db.iterator_cf(cf_handle, rocksdb::IteratorMode::Start);

        for item in iter {
            let (key, value) = item.map_err(|e| StorageError::Database(e.to_string()))?;
            results.push((decode_key(&key)?, deserialize_value(&value)?));
        }

        Ok(results)
    }
}
