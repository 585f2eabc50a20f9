//! # siwa-crypto
//!
//! Cryptographic helpers for the Sign in with Apple handshake.
//!
//! - Nonce generation over a fixed alphabet with rejection sampling
//! - SHA-256 commitment of the nonce, rendered as lowercase hex
//! - The secure random source abstraction the generator draws from

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod errors;
pub mod hashing;
pub mod nonce;
pub mod random;
pub mod utils;

pub use constants::*;
pub use errors::{CryptoError, Result};
pub use hashing::*;
pub use nonce::{generate_default_nonce, generate_nonce, NonceGenerator};
pub use random::{OsSecureRandom, SecureRandom};
pub use utils::current_timestamp;
