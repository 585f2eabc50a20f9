/*!
 * Client commands
 */

pub mod decode;
pub mod nonce;
pub mod sign_in;
pub mod users;

use anyhow::{Context, Result};
use siwa_identity_core::CredentialUpsertService;
use siwa_storage::RocksDbStorage;
use std::sync::Arc;

use crate::config::ClientConfig;

/// Open the configured database and wrap it in the upsert service
pub fn open_identity_core(config: &ClientConfig) -> Result<Arc<CredentialUpsertService<RocksDbStorage>>> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let storage = RocksDbStorage::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;

    tracing::debug!(database = %config.database_path.display(), "Opened user store");

    Ok(Arc::new(CredentialUpsertService::new(Arc::new(storage))))
}
