//! Local identity provider for development and tests.
//!
//! Issues identity tokens shaped like Apple's (issuer, audience, nonce
//! digest, relay email) but with `alg: none` and an empty signature. Tokens
//! from this provider must never be accepted by anything that verifies
//! signatures.

use crate::errors::ProviderError;
use crate::traits::IdentityProvider;
use crate::types::{AppleIdCredential, AuthorizationRequest, PersonName, Scope};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::json;
use siwa_crypto::{current_timestamp, sha256};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

/// Issuer Apple puts in identity tokens
pub const APPLE_ISSUER: &str = "https://appleid.apple.com";

/// Domain of Apple private relay addresses
pub const PRIVATE_RELAY_DOMAIN: &str = "privaterelay.appleid.com";

/// Identity token lifetime (10 minutes, as Apple issues them)
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: u64 = 600;

/// The user the local provider signs in
#[derive(Debug, Clone)]
pub struct LocalProfile {
    /// Provider user id
    pub user: String,
    /// Given name
    pub given_name: Option<String>,
    /// Family name
    pub family_name: Option<String>,
    /// Real email address
    pub email: String,
    /// Hide the real email behind a relay address
    pub hide_email: bool,
}

/// In-process identity provider that signs in a single configured user
pub struct LocalIdentityProvider {
    profile: LocalProfile,
    client_id: String,
    token_lifetime: u64,
    /// Users who have already shared name and email
    shared_with: Mutex<HashSet<String>>,
}

impl LocalIdentityProvider {
    /// Create a provider issuing tokens for `client_id`
    pub fn new(profile: LocalProfile, client_id: impl Into<String>) -> Self {
        Self {
            profile,
            client_id: client_id.into(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME_SECONDS,
            shared_with: Mutex::new(HashSet::new()),
        }
    }

    /// Override the identity token lifetime
    pub fn with_token_lifetime(mut self, seconds: u64) -> Self {
        self.token_lifetime = seconds;
        self
    }

    /// Email as it appears in the identity token
    pub fn token_email(&self) -> String {
        if self.profile.hide_email {
            let digest = hex::encode(sha256(self.profile.user.as_bytes()));
            format!("{}@{}", &digest[..10], PRIVATE_RELAY_DOMAIN)
        } else {
            self.profile.email.clone()
        }
    }

    fn identity_token(&self, request: &AuthorizationRequest, now: u64) -> String {
        let header = json!({ "alg": "none", "kid": "local" });
        let mut payload = json!({
            "iss": APPLE_ISSUER,
            "aud": self.client_id,
            "exp": now.saturating_add(self.token_lifetime),
            "iat": now,
            "sub": self.profile.user,
            "nonce": request.nonce,
            "nonce_supported": true,
            "auth_time": now,
        });
        if request.scopes.contains(&Scope::Email) {
            payload["email"] = json!(self.token_email());
            payload["email_verified"] = json!("true");
            payload["is_private_email"] = json!(if self.profile.hide_email { "true" } else { "false" });
        }

        format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(header.to_string()),
            URL_SAFE_NO_PAD.encode(payload.to_string())
        )
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn authorize(
        &self,
        request: AuthorizationRequest,
    ) -> std::result::Result<AppleIdCredential, ProviderError> {
        let first_authorization = self
            .shared_with
            .lock()
            .map_err(|_| ProviderError::Failed("provider state poisoned".to_string()))?
            .insert(self.profile.user.clone());

        debug!(
            user = %self.profile.user,
            first_authorization,
            scopes = %request.scope_string(),
            "Local provider authorizing"
        );

        let now = current_timestamp();
        let identity_token = self.identity_token(&request, now);
        let authorization_code = hex::encode(rand::random::<[u8; 16]>());

        let full_name = (first_authorization && request.scopes.contains(&Scope::FullName)).then(|| {
            PersonName {
                given_name: self.profile.given_name.clone(),
                family_name: self.profile.family_name.clone(),
            }
        });
        let email = (first_authorization && request.scopes.contains(&Scope::Email))
            .then(|| self.token_email());

        Ok(AppleIdCredential {
            user: self.profile.user.clone(),
            identity_token: Some(identity_token.into_bytes()),
            authorization_code: Some(authorization_code.into_bytes()),
            state: Some(request.state),
            full_name,
            email,
        })
    }
}
