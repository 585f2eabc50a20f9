//! Auth methods error types.

use thiserror::Error;

/// Failure reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The user dismissed the authorization sheet
    #[error("Authorization canceled by user")]
    Canceled,

    /// The provider could not complete the authorization
    #[error("Authorization failed: {0}")]
    Failed(String),
}

/// Auth methods errors
#[derive(Debug, Error)]
pub enum AuthMethodsError {
    /// Identity provider reported a failure or cancellation
    #[error("Identity provider error: {0}")]
    Provider(#[from] ProviderError),

    /// No provider response within the configured timeout
    #[error("Identity provider did not respond within {0:?}")]
    ProviderTimedOut(std::time::Duration),

    /// Credential has no identity token
    #[error("Credential is missing the identity token")]
    MissingIdentityToken,

    /// Credential has no authorization code
    #[error("Credential is missing the authorization code")]
    MissingAuthorizationCode,

    /// Credential field is not valid UTF-8
    #[error("Credential field is not valid UTF-8: {0}")]
    InvalidUtf8(&'static str),

    /// Credential answers a different attempt
    #[error("State mismatch: expected {expected}, got {got}")]
    StateMismatch {
        /// State sent with the request
        expected: String,
        /// State returned with the credential
        got: String,
    },

    /// Configuration cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Crypto error
    #[error("Crypto error: {0}")]
    Crypto(#[from] siwa_crypto::CryptoError),

    /// Identity core error
    #[error("Identity core error: {0}")]
    IdentityCore(#[from] siwa_identity_core::IdentityCoreError),
}

/// Result type for auth methods operations
pub type Result<T> = std::result::Result<T, AuthMethodsError>;
