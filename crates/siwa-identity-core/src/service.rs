//! Identity Core service implementation.

use crate::{errors::*, traits::*, types::*};
use async_trait::async_trait;
use siwa_crypto::current_timestamp;
use siwa_storage::{Storage, StorageError, CF_USER_RECORDS};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fetch-or-create upsert over a [`Storage`] backend.
///
/// Creation goes through the store's conditional create, so concurrent
/// first sign-ins for one provider user id leave a single record behind.
pub struct CredentialUpsertService<S>
where
    S: Storage,
{
    storage: Arc<S>,
}

impl<S> CredentialUpsertService<S>
where
    S: Storage,
{
    /// Create a new upsert service
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    async fn create_user(
        &self,
        key: &str,
        provider_user_id: &str,
        display_name: &str,
        email_relay: &str,
    ) -> Result<UpsertOutcome> {
        let record = UserRecord::new(
            provider_user_id,
            display_name,
            email_relay,
            current_timestamp(),
        );

        match self.storage.create(CF_USER_RECORDS, key, &record).await {
            Ok(()) => {
                info!(record_name = %key, "User record saved");
                Ok(UpsertOutcome::Created)
            }
            Err(StorageError::AlreadyExists(_)) => {
                debug!(record_name = %key, "User record created concurrently");
                Ok(UpsertOutcome::AlreadyExists)
            }
            Err(e) => {
                warn!(record_name = %key, error = %e, "Error saving user record");
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl<S> IdentityCore for CredentialUpsertService<S>
where
    S: Storage,
{
    async fn upsert_user(
        &self,
        provider_user_id: &str,
        display_name: &str,
        email_relay: &str,
    ) -> Result<UpsertOutcome> {
        if provider_user_id.is_empty() {
            return Err(IdentityCoreError::InvalidProviderUserId);
        }

        let key = record_key(provider_user_id);

        let existing: siwa_storage::Result<UserRecord> =
            self.storage.fetch(CF_USER_RECORDS, &key).await;

        match existing {
            Ok(_) => {
                info!(record_name = %key, "User record already exists");
                Ok(UpsertOutcome::AlreadyExists)
            }
            Err(StorageError::NotFound(_)) => {
                self.create_user(&key, provider_user_id, display_name, email_relay)
                    .await
            }
            Err(e) => {
                warn!(record_name = %key, error = %e, "Error fetching user record");
                Err(e.into())
            }
        }
    }

    async fn get_user(&self, provider_user_id: &str) -> Result<UserRecord> {
        let key = record_key(provider_user_id);

        self.storage
            .fetch(CF_USER_RECORDS, &key)
            .await
            .map_err(|e| match e {
                StorageError::NotFound(_) => {
                    IdentityCoreError::UserNotFound(provider_user_id.to_string())
                }
                other => other.into(),
            })
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let records: Vec<(String, UserRecord)> = self.storage.scan_all(CF_USER_RECORDS).await?;
        Ok(records.into_iter().map(|(_, record)| record).collect())
    }
}
