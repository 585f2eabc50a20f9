//! Sign-in configuration.

use crate::errors::{AuthMethodsError, Result};
use crate::types::Scope;
use siwa_crypto::DEFAULT_NONCE_LENGTH;
use std::time::Duration;

/// Default wait for the identity provider (5 minutes)
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(300);

/// Sign-in configuration
#[derive(Debug, Clone)]
pub struct SignInConfig {
    /// Length of the per-attempt nonce
    pub nonce_length: usize,
    /// Scopes requested from the provider
    pub scopes: Vec<Scope>,
    /// How long `sign_in` waits for the provider
    pub provider_timeout: Duration,
}

impl Default for SignInConfig {
    fn default() -> Self {
        Self {
            nonce_length: DEFAULT_NONCE_LENGTH,
            scopes: vec![Scope::Email, Scope::FullName],
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}

impl SignInConfig {
    /// Check values that would otherwise fail at sign-in time
    pub fn validate(&self) -> Result<()> {
        if self.nonce_length == 0 {
            return Err(AuthMethodsError::InvalidConfig(
                "nonce length must be greater than zero".to_string(),
            ));
        }
        if self.provider_timeout.is_zero() {
            return Err(AuthMethodsError::InvalidConfig(
                "provider timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SignInConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.nonce_length, 32);
        assert_eq!(config.scopes, vec![Scope::Email, Scope::FullName]);
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = SignInConfig {
            nonce_length: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AuthMethodsError::InvalidConfig(_))
        ));

        let config = SignInConfig {
            provider_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
