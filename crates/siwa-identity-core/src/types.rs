//! Identity Core types.

use serde::{Deserialize, Serialize};

/// Record type name stored alongside every user record
pub const USER_RECORD_TYPE: &str = "User";

/// Prefix of every user record key
pub const USER_RECORD_PREFIX: &str = "user_";

/// Deterministic record key for a provider user id
pub fn record_key(provider_user_id: &str) -> String {
    format!("{}{}", USER_RECORD_PREFIX, provider_user_id)
}

/// Stored identity of a user who signed in with Apple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Record type, always [`USER_RECORD_TYPE`]
    pub record_type: String,
    /// Record key, `user_<provider_user_id>`
    pub record_name: String,
    /// Name to show for the user, may be empty
    pub display_name: String,
    /// Email from the identity token, possibly a private relay address
    pub email_relay: String,
    /// Unix timestamp of the first sign-in
    pub created_at: u64,
}

impl UserRecord {
    /// Build a new record for `provider_user_id`
    pub fn new(
        provider_user_id: &str,
        display_name: impl Into<String>,
        email_relay: impl Into<String>,
        created_at: u64,
    ) -> Self {
        Self {
            record_type: USER_RECORD_TYPE.to_string(),
            record_name: record_key(provider_user_id),
            display_name: display_name.into(),
            email_relay: email_relay.into(),
            created_at,
        }
    }

    /// Provider user id this record belongs to
    pub fn provider_user_id(&self) -> &str {
        self.record_name
            .strip_prefix(USER_RECORD_PREFIX)
            .unwrap_or(&self.record_name)
    }
}

/// Result of a successful upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// No record existed; one was created
    Created,
    /// A record already existed and was left untouched
    AlreadyExists,
}
