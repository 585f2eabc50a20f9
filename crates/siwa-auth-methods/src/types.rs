//! Request, credential and result types for the handshake.

use serde::{Deserialize, Serialize};
use siwa_identity_core::UpsertOutcome;
use std::fmt;

use crate::token::TokenClaims;

/// Scope requested from the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The user's email, possibly a private relay address
    Email,
    /// The user's given and family name
    FullName,
}

impl Scope {
    /// Scope name as sent to the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Email => "email",
            Scope::FullName => "name",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization request handed to the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    /// Requested scopes
    pub scopes: Vec<Scope>,
    /// SHA-256 hex digest of the attempt's nonce; the raw nonce never leaves the attempt
    pub nonce: String,
    /// Opaque per-attempt value the provider may echo back
    pub state: String,
}

impl AuthorizationRequest {
    /// Space-separated scope string
    pub fn scope_string(&self) -> String {
        self.scopes
            .iter()
            .map(Scope::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Name components shared by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    /// Given name
    pub given_name: Option<String>,
    /// Family name
    pub family_name: Option<String>,
}

impl PersonName {
    /// Given and family name joined by a space, `None` when both are absent or empty
    pub fn display_name(&self) -> Option<String> {
        let joined = [self.given_name.as_deref(), self.family_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// Credential returned by the identity provider.
///
/// Name and email are only shared the first time a user authorizes the app;
/// later credentials carry just the user id and tokens.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppleIdCredential {
    /// Stable, provider-assigned user identifier
    pub user: String,
    /// Compact JWS identity token, UTF-8 bytes
    pub identity_token: Option<Vec<u8>>,
    /// Short-lived authorization code, UTF-8 bytes
    pub authorization_code: Option<Vec<u8>>,
    /// State echoed from the request
    pub state: Option<String>,
    /// Name shared by the user
    pub full_name: Option<PersonName>,
    /// Email shared by the user
    pub email: Option<String>,
}

impl fmt::Debug for AppleIdCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppleIdCredential")
            .field("user", &self.user)
            .field("identity_token", &self.identity_token.as_ref().map(|_| "<redacted>"))
            .field(
                "authorization_code",
                &self.authorization_code.as_ref().map(|_| "<redacted>"),
            )
            .field("state", &self.state)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .finish()
    }
}

/// Values a backend needs to finish the exchange with the provider
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInPayload {
    /// Identity token as received
    pub id_token: String,
    /// Authorization code as received
    pub authorization_code: String,
    /// The nonce whose digest was sent with the request
    pub raw_nonce: String,
    /// Display name, when the provider shared one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Email, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl fmt::Debug for SignInPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInPayload")
            .field("id_token", &"<redacted>")
            .field("authorization_code", &"<redacted>")
            .field("raw_nonce", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .finish()
    }
}

/// Result of a completed sign-in
#[derive(Debug, Clone)]
pub struct SignInOutcome {
    /// Provider user id the record is keyed by
    pub provider_user_id: String,
    /// Whether the record was created by this sign-in
    pub upsert: UpsertOutcome,
    /// Unverified identity token claims, `None` if the payload did not decode
    pub claims: Option<TokenClaims>,
    /// Exchange payload for a backend
    pub payload: SignInPayload,
}
