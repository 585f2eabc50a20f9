//! Nonce generation for the authorization request.
//!
//! Bytes are drawn one at a time and mapped onto the alphabet with rejection
//! sampling: a byte at or above the largest multiple of the alphabet size
//! that fits in 256 is discarded, so every symbol is equally likely.

use crate::constants::{DEFAULT_NONCE_LENGTH, NONCE_ALPHABET};
use crate::errors::{CryptoError, Result};
use crate::random::{OsSecureRandom, SecureRandom};

/// Generates single-use nonces from a secure random source
#[derive(Debug, Clone)]
pub struct NonceGenerator<R: SecureRandom = OsSecureRandom> {
    rng: R,
    alphabet: Vec<u8>,
    /// Bytes strictly below this value are accepted
    acceptance_limit: u16,
}

impl NonceGenerator<OsSecureRandom> {
    /// Generator over the default alphabet backed by the OS RNG
    pub fn new() -> Self {
        Self::from_parts(OsSecureRandom, NONCE_ALPHABET.to_vec())
    }
}

impl Default for NonceGenerator<OsSecureRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SecureRandom> NonceGenerator<R> {
    /// Generator over the default alphabet backed by `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::from_parts(rng, NONCE_ALPHABET.to_vec())
    }

    /// Generator over a custom alphabet.
    ///
    /// The alphabet must hold between 1 and 256 distinct ASCII symbols.
    pub fn with_alphabet(rng: R, alphabet: &[u8]) -> Result<Self> {
        if alphabet.is_empty() || alphabet.len() > 256 {
            return Err(CryptoError::InvalidAlphabet(format!(
                "expected 1..=256 symbols, got {}",
                alphabet.len()
            )));
        }
        if !alphabet.is_ascii() {
            return Err(CryptoError::InvalidAlphabet(
                "symbols must be ASCII".to_string(),
            ));
        }
        let mut seen = [false; 128];
        for &symbol in alphabet {
            if std::mem::replace(&mut seen[symbol as usize], true) {
                return Err(CryptoError::InvalidAlphabet(format!(
                    "duplicate symbol {:?}",
                    symbol as char
                )));
            }
        }

        Ok(Self::from_parts(rng, alphabet.to_vec()))
    }

    fn from_parts(rng: R, alphabet: Vec<u8>) -> Self {
        let size = alphabet.len() as u16;
        Self {
            rng,
            alphabet,
            acceptance_limit: 256 - (256 % size),
        }
    }

    /// Symbols this generator draws from
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    /// Generate a nonce of exactly `length` symbols.
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    pub fn generate(&mut self, length: usize) -> Result<String> {
        assert!(length > 0, "nonce length must be greater than zero");

        let size = self.alphabet.len() as u16;
        let mut nonce = String::with_capacity(length);

        while nonce.len() < length {
            let byte = u16::from(self.rng.next_byte()?);
            if byte >= self.acceptance_limit {
                continue;
            }
            nonce.push(char::from(self.alphabet[(byte % size) as usize]));
        }

        Ok(nonce)
    }
}

/// Generate a nonce of `length` symbols from the OS RNG.
///
/// # Panics
///
/// Panics if `length` is zero.
pub fn generate_nonce(length: usize) -> Result<String> {
    NonceGenerator::new().generate(length)
}

/// Generate a nonce of the default length from the OS RNG
pub fn generate_default_nonce() -> Result<String> {
    generate_nonce(DEFAULT_NONCE_LENGTH)
}
