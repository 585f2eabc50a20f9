//! Cryptographic error types.

use thiserror::Error;

/// Cryptographic operation errors
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The secure random source could not produce bytes
    #[error("Random number generation failed: {0}")]
    RandomGenerationFailed(String),

    /// Nonce alphabet cannot be used for unbiased sampling
    #[error("Invalid nonce alphabet: {0}")]
    InvalidAlphabet(String),
}

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;
