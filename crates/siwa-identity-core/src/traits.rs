//! Identity Core trait definitions.

use crate::{errors::Result, types::*};
use async_trait::async_trait;

/// Identity Core subsystem trait
#[async_trait]
pub trait IdentityCore: Send + Sync {
    /// Create the record for `provider_user_id` if it does not exist yet.
    ///
    /// An existing record is never modified, whatever `display_name` and
    /// `email_relay` are passed on later calls.
    async fn upsert_user(
        &self,
        provider_user_id: &str,
        display_name: &str,
        email_relay: &str,
    ) -> Result<UpsertOutcome>;

    /// Get the record for a provider user id
    async fn get_user(&self, provider_user_id: &str) -> Result<UserRecord>;

    /// List every stored record, ordered by key
    async fn list_users(&self) -> Result<Vec<UserRecord>>;
}
