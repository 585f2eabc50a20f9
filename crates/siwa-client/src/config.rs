use anyhow::Result;
use siwa_auth_methods::SignInConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Container whose records the client manages when none is configured
pub const DEFAULT_CONTAINER: &str = "iCloud.TestUserData";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Record container name
    pub container: String,

    /// Path to the RocksDB database holding the container's records
    pub database_path: PathBuf,

    /// Client id the local provider issues tokens for
    pub client_id: String,

    /// Handshake settings
    pub sign_in: SignInConfig,
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let container =
            std::env::var("SIWA_CONTAINER").unwrap_or_else(|_| DEFAULT_CONTAINER.to_string());

        let database_path = std::env::var("SIWA_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data").join(format!("{}.db", container)));

        let client_id = std::env::var("SIWA_CLIENT_ID")
            .unwrap_or_else(|_| "com.example.TestSignInWithApple".to_string());

        let mut sign_in = SignInConfig::default();

        if let Ok(length) = std::env::var("SIWA_NONCE_LENGTH") {
            sign_in.nonce_length = length.parse()?;
        }

        if let Ok(seconds) = std::env::var("SIWA_PROVIDER_TIMEOUT_SECONDS") {
            sign_in.provider_timeout = Duration::from_secs(seconds.parse()?);
        }

        sign_in.validate()?;

        Ok(ClientConfig {
            container,
            database_path,
            client_id,
            sign_in,
        })
    }
}
