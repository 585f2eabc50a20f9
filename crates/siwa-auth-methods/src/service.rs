//! Sign-in handshake service.

use crate::{config::SignInConfig, errors::*, token::*, traits::IdentityProvider, types::*};
use siwa_crypto::{sha256_hex, NonceGenerator, OsSecureRandom, SecureRandom};
use siwa_identity_core::IdentityCore;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One in-flight sign-in attempt.
///
/// Owns the raw nonce. [`SignInService::complete`] takes the attempt by
/// value, so a nonce is consumed exactly once; dropping the attempt
/// discards it.
pub struct AuthAttempt {
    nonce: String,
    request: AuthorizationRequest,
}

impl AuthAttempt {
    /// Request to hand to the identity provider
    pub fn request(&self) -> &AuthorizationRequest {
        &self.request
    }

    /// State sent with the request
    pub fn state(&self) -> &str {
        &self.request.state
    }
}

impl fmt::Debug for AuthAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthAttempt")
            .field("nonce", &"<redacted>")
            .field("request", &self.request)
            .finish()
    }
}

/// Runs sign-in attempts against an identity provider and records the
/// resulting identities in the identity core
pub struct SignInService<P, I>
where
    P: IdentityProvider,
    I: IdentityCore,
{
    provider: Arc<P>,
    identity_core: Arc<I>,
    config: SignInConfig,
}

impl<P, I> SignInService<P, I>
where
    P: IdentityProvider,
    I: IdentityCore,
{
    /// Create a new sign-in service
    pub fn new(provider: Arc<P>, identity_core: Arc<I>, config: SignInConfig) -> Self {
        Self {
            provider,
            identity_core,
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &SignInConfig {
        &self.config
    }

    /// Start an attempt with a nonce from the OS RNG.
    ///
    /// # Panics
    ///
    /// Panics if the configured nonce length is zero.
    pub fn begin(&self) -> Result<AuthAttempt> {
        self.begin_with(OsSecureRandom)
    }

    /// Start an attempt with a nonce drawn from `rng`
    pub fn begin_with<R: SecureRandom>(&self, rng: R) -> Result<AuthAttempt> {
        let nonce = NonceGenerator::with_rng(rng).generate(self.config.nonce_length)?;
        let request = AuthorizationRequest {
            scopes: self.config.scopes.clone(),
            nonce: sha256_hex(&nonce),
            state: Uuid::new_v4().to_string(),
        };

        debug!(
            state = %request.state,
            nonce_digest = %request.nonce,
            "Sign-in attempt started"
        );

        Ok(AuthAttempt { nonce, request })
    }

    /// Run a whole attempt: begin, wait for the provider, complete.
    ///
    /// The provider wait is bounded by `provider_timeout`; on expiry the
    /// attempt is dropped and `ProviderTimedOut` returned.
    pub async fn sign_in(&self) -> Result<SignInOutcome> {
        let attempt = self.begin()?;
        let timeout = self.config.provider_timeout;

        let result = tokio::time::timeout(timeout, self.provider.authorize(attempt.request().clone()))
            .await
            .map_err(|_| {
                warn!(state = %attempt.state(), "Identity provider timed out");
                AuthMethodsError::ProviderTimedOut(timeout)
            })?;

        self.complete(attempt, result).await
    }

    /// Finish an attempt with the provider's answer.
    ///
    /// Identity token claims are decoded without signature verification and
    /// only inspected. A token whose payload does not decode is logged and
    /// the sign-in continues without claims.
    pub async fn complete(
        &self,
        attempt: AuthAttempt,
        result: std::result::Result<AppleIdCredential, ProviderError>,
    ) -> Result<SignInOutcome> {
        let credential = result.map_err(|e| {
            warn!(state = %attempt.state(), error = %e, "Continue with Apple failed");
            AuthMethodsError::from(e)
        })?;

        if let Some(state) = &credential.state {
            if state != attempt.state() {
                return Err(AuthMethodsError::StateMismatch {
                    expected: attempt.request.state.clone(),
                    got: state.clone(),
                });
            }
        }

        let id_token = utf8_field(
            credential.identity_token.as_deref(),
            AuthMethodsError::MissingIdentityToken,
            "identity_token",
        )?;
        let authorization_code = utf8_field(
            credential.authorization_code.as_deref(),
            AuthMethodsError::MissingAuthorizationCode,
            "authorization_code",
        )?;

        let claims = decode_claims(&id_token);
        match &claims {
            Some(claims) => log_claims(claims, &credential.user),
            None => warn!(user = %credential.user, "Identity token payload could not be decoded"),
        }

        let display_name = credential.full_name.as_ref().and_then(PersonName::display_name);
        let email = claims
            .as_ref()
            .and_then(|c| c.email.clone())
            .or_else(|| credential.email.clone());

        let upsert = self
            .identity_core
            .upsert_user(
                &credential.user,
                display_name.as_deref().unwrap_or(""),
                email.as_deref().unwrap_or(""),
            )
            .await?;

        info!(
            provider_user_id = %credential.user,
            upsert = ?upsert,
            "Sign in with Apple completed"
        );

        Ok(SignInOutcome {
            provider_user_id: credential.user,
            upsert,
            claims,
            payload: SignInPayload {
                id_token,
                authorization_code,
                raw_nonce: attempt.nonce,
                full_name: display_name,
                email,
            },
        })
    }
}

fn utf8_field(
    bytes: Option<&[u8]>,
    missing: AuthMethodsError,
    name: &'static str,
) -> Result<String> {
    let bytes = bytes.ok_or(missing)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| AuthMethodsError::InvalidUtf8(name))
}

fn log_claims(claims: &TokenClaims, credential_user: &str) {
    debug!(payload = ?claims.payload, "Identity token payload");

    if let Some(sub) = &claims.sub {
        info!(sub = %sub, "Apple user id");
        if sub != credential_user {
            warn!(
                sub = %sub,
                user = %credential_user,
                "Token subject does not match credential user"
            );
        }
    }
    if let Some(email) = &claims.email {
        info!(email = %email, private_relay = ?claims.is_private_email, "Email (possibly relay)");
    }
    if let Some(expires_at) = claims.expires_at() {
        info!(expires_at = %expires_at, "Token exp");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use serde_json::json;
    use siwa_crypto::{CryptoError, SHA256_HEX_LENGTH};
    use siwa_identity_core::{CredentialUpsertService, UpsertOutcome};
    use siwa_storage::MemoryStorage;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Provider that answers with a fixed result and records the request
    struct ScriptedProvider {
        result: std::result::Result<AppleIdCredential, ProviderError>,
        seen: Mutex<Vec<AuthorizationRequest>>,
    }

    impl ScriptedProvider {
        fn new(result: std::result::Result<AppleIdCredential, ProviderError>) -> Self {
            Self {
                result,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for ScriptedProvider {
        async fn authorize(
            &self,
            request: AuthorizationRequest,
        ) -> std::result::Result<AppleIdCredential, ProviderError> {
            self.seen.lock().unwrap().push(request.clone());
            let mut result = self.result.clone();
            if let Ok(credential) = &mut result {
                credential.state = Some(request.state);
            }
            result
        }
    }

    /// Provider that never answers
    struct SilentProvider;

    #[async_trait]
    impl IdentityProvider for SilentProvider {
        async fn authorize(
            &self,
            _request: AuthorizationRequest,
        ) -> std::result::Result<AppleIdCredential, ProviderError> {
            std::future::pending().await
        }
    }

    struct BrokenRandom;

    impl SecureRandom for BrokenRandom {
        fn next_byte(&mut self) -> siwa_crypto::Result<u8> {
            Err(CryptoError::RandomGenerationFailed("no entropy".to_string()))
        }
    }

    type TestCore = CredentialUpsertService<MemoryStorage>;

    fn token(payload: serde_json::Value) -> Vec<u8> {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256"}"#),
            URL_SAFE_NO_PAD.encode(payload.to_string())
        )
        .into_bytes()
    }

    fn credential(user: &str, email_claim: Option<&str>) -> AppleIdCredential {
        let mut payload = json!({ "sub": user, "exp": 1234567890 });
        if let Some(email) = email_claim {
            payload["email"] = json!(email);
        }

        AppleIdCredential {
            user: user.to_string(),
            identity_token: Some(token(payload)),
            authorization_code: Some(b"auth-code".to_vec()),
            state: None,
            full_name: Some(PersonName {
                given_name: Some("Alice".to_string()),
                family_name: Some("Smith".to_string()),
            }),
            email: Some("credential@example.com".to_string()),
        }
    }

    fn service<P: IdentityProvider>(provider: P) -> (SignInService<P, TestCore>, Arc<TestCore>) {
        let core = Arc::new(CredentialUpsertService::new(Arc::new(MemoryStorage::new())));
        let service = SignInService::new(Arc::new(provider), Arc::clone(&core), SignInConfig::default());
        (service, core)
    }

    #[test]
    fn test_begin_builds_request() {
        let (service, _core) = service(SilentProvider);
        let attempt = service.begin().unwrap();

        assert_eq!(attempt.nonce.len(), 32);
        assert_eq!(attempt.request().nonce, sha256_hex(&attempt.nonce));
        assert_eq!(attempt.request().nonce.len(), SHA256_HEX_LENGTH);
        assert_eq!(attempt.request().scopes, vec![Scope::Email, Scope::FullName]);
        assert!(Uuid::parse_str(attempt.state()).is_ok());
    }

    #[test]
    fn test_each_attempt_gets_fresh_nonce_and_state() {
        let (service, _core) = service(SilentProvider);
        let first = service.begin().unwrap();
        let second = service.begin().unwrap();

        assert_ne!(first.nonce, second.nonce);
        assert_ne!(first.request().nonce, second.request().nonce);
        assert_ne!(first.state(), second.state());
    }

    #[test]
    fn test_entropy_failure_aborts_attempt() {
        let (service, _core) = service(SilentProvider);
        let result = service.begin_with(BrokenRandom);
        assert!(matches!(
            result,
            Err(AuthMethodsError::Crypto(CryptoError::RandomGenerationFailed(_)))
        ));
    }

    #[test]
    fn test_attempt_debug_hides_nonce() {
        let (service, _core) = service(SilentProvider);
        let attempt = service.begin().unwrap();
        let debug = format!("{:?}", attempt);
        assert!(!debug.contains(&attempt.nonce));
    }

    #[tokio::test]
    async fn test_sign_in_creates_then_finds_record() {
        let provider = ScriptedProvider::new(Ok(credential("u1", Some("a@relay.example"))));
        let (service, core) = service(provider);

        let first = service.sign_in().await.unwrap();
        assert_eq!(first.upsert, UpsertOutcome::Created);
        assert_eq!(first.provider_user_id, "u1");
        assert_eq!(first.claims.as_ref().unwrap().sub.as_deref(), Some("u1"));
        assert_eq!(first.payload.full_name.as_deref(), Some("Alice Smith"));
        assert_eq!(first.payload.email.as_deref(), Some("a@relay.example"));
        assert_eq!(first.payload.authorization_code, "auth-code");

        let second = service.sign_in().await.unwrap();
        assert_eq!(second.upsert, UpsertOutcome::AlreadyExists);

        let record = core.get_user("u1").await.unwrap();
        assert_eq!(record.display_name, "Alice Smith");
        assert_eq!(record.email_relay, "a@relay.example");
    }

    #[tokio::test]
    async fn test_provider_receives_digest_not_nonce() {
        let provider = Arc::new(ScriptedProvider::new(Ok(credential("u1", None))));
        let core = Arc::new(CredentialUpsertService::new(Arc::new(MemoryStorage::new())));
        let service = SignInService::new(Arc::clone(&provider), core, SignInConfig::default());

        let outcome = service.sign_in().await.unwrap();

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].nonce, sha256_hex(&outcome.payload.raw_nonce));
        assert_ne!(seen[0].nonce, outcome.payload.raw_nonce);
    }

    #[tokio::test]
    async fn test_email_falls_back_to_credential() {
        let provider = ScriptedProvider::new(Ok(credential("u1", None)));
        let (service, core) = service(provider);

        service.sign_in().await.unwrap();
        let record = core.get_user("u1").await.unwrap();
        assert_eq!(record.email_relay, "credential@example.com");
    }

    #[tokio::test]
    async fn test_missing_email_and_name_store_empty_strings() {
        let mut credential = credential("u1", None);
        credential.email = None;
        credential.full_name = None;
        let (service, core) = service(ScriptedProvider::new(Ok(credential)));

        service.sign_in().await.unwrap();
        let record = core.get_user("u1").await.unwrap();
        assert_eq!(record.display_name, "");
        assert_eq!(record.email_relay, "");
    }

    #[tokio::test]
    async fn test_malformed_token_still_signs_in() {
        let mut credential = credential("u1", None);
        credential.identity_token = Some(b"not-a-jwt".to_vec());
        let (service, core) = service(ScriptedProvider::new(Ok(credential)));

        let outcome = service.sign_in().await.unwrap();
        assert!(outcome.claims.is_none());
        assert_eq!(outcome.upsert, UpsertOutcome::Created);
        assert_eq!(core.get_user("u1").await.unwrap().email_relay, "credential@example.com");
    }

    #[tokio::test]
    async fn test_cancellation_is_reported() {
        let (service, core) = service(ScriptedProvider::new(Err(ProviderError::Canceled)));

        let result = service.sign_in().await;
        assert!(matches!(
            result,
            Err(AuthMethodsError::Provider(ProviderError::Canceled))
        ));
        assert!(core.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_identity_token() {
        let mut credential = credential("u1", None);
        credential.identity_token = None;
        let (service, _core) = service(ScriptedProvider::new(Ok(credential)));

        let result = service.sign_in().await;
        assert!(matches!(result, Err(AuthMethodsError::MissingIdentityToken)));
    }

    #[tokio::test]
    async fn test_missing_authorization_code() {
        let mut credential = credential("u1", None);
        credential.authorization_code = None;
        let (service, _core) = service(ScriptedProvider::new(Ok(credential)));

        let result = service.sign_in().await;
        assert!(matches!(result, Err(AuthMethodsError::MissingAuthorizationCode)));
    }

    #[tokio::test]
    async fn test_invalid_utf8_token() {
        let mut credential = credential("u1", None);
        credential.identity_token = Some(vec![0xff, 0xfe]);
        let (service, _core) = service(ScriptedProvider::new(Ok(credential)));

        let result = service.sign_in().await;
        assert!(matches!(result, Err(AuthMethodsError::InvalidUtf8("identity_token"))));
    }

    #[tokio::test]
    async fn test_state_mismatch_rejected() {
        let (service, core) = service(SilentProvider);
        let attempt = service.begin().unwrap();

        let mut credential = credential("u1", None);
        credential.state = Some("someone-else".to_string());

        let result = service.complete(attempt, Ok(credential)).await;
        assert!(matches!(result, Err(AuthMethodsError::StateMismatch { .. })));
        assert!(core.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_complete_without_echoed_state() {
        let (service, _core) = service(SilentProvider);
        let attempt = service.begin().unwrap();

        let outcome = service
            .complete(attempt, Ok(credential("u1", None)))
            .await
            .unwrap();
        assert_eq!(outcome.upsert, UpsertOutcome::Created);
    }

    #[tokio::test]
    async fn test_provider_timeout() {
        let core = Arc::new(CredentialUpsertService::new(Arc::new(MemoryStorage::new())));
        let config = SignInConfig {
            provider_timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let service = SignInService::new(Arc::new(SilentProvider), core, config);

        let result = service.sign_in().await;
        assert!(matches!(result, Err(AuthMethodsError::ProviderTimedOut(_))));
    }
}
