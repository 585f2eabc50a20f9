//! # siwa-storage
//!
//! Record store abstraction for persisted user identities.
//!
//! The [`Storage`] trait is the only contract the identity core relies on:
//! keyed fetch that reports a missing key as [`StorageError::NotFound`],
//! unconditional save, and a conditional create that refuses to overwrite.
//! Two backends are provided, RocksDB for on-disk use and an in-memory map.

#![warn(clippy::all)]

pub mod column_families;
pub mod errors;
pub mod memory;
pub mod rocksdb_impl;
pub mod traits;

pub use column_families::*;
pub use errors::{Result, StorageError};
pub use memory::MemoryStorage;
pub use rocksdb_impl::RocksDbStorage;
pub use traits::Storage;
