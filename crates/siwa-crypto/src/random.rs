//! Secure random byte source.

use crate::errors::{CryptoError, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// Source of cryptographically secure random bytes.
///
/// A failure is fatal for the attempt that requested the bytes; callers do
/// not retry.
pub trait SecureRandom {
    /// Produce the next random byte
    fn next_byte(&mut self) -> Result<u8>;
}

/// Random source backed by the operating system RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSecureRandom;

impl SecureRandom for OsSecureRandom {
    fn next_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        OsRng
            .try_fill_bytes(&mut byte)
            .map_err(|e| CryptoError::RandomGenerationFailed(e.to_string()))?;
        Ok(byte[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_random_produces_bytes() {
        let mut rng = OsSecureRandom;
        let bytes: Vec<u8> = (0..64).map(|_| rng.next_byte().unwrap()).collect();

        // 64 identical bytes from a working OS RNG is not a realistic outcome
        assert!(bytes.iter().any(|b| *b != bytes[0]));
    }
}
