//! Nonce and digest constants.

/// Symbols a nonce is drawn from.
///
/// Digits, upper and lower case letters, `-`, `.` and `_` (64 symbols).
/// Upper case `W` is not part of the set.
pub const NONCE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVXYZabcdefghijklmnopqrstuvwxyz-._";

/// Nonce length used when the caller has no preference
pub const DEFAULT_NONCE_LENGTH: usize = 32;

/// Size of a SHA-256 digest in bytes
pub const SHA256_DIGEST_SIZE: usize = 32;

/// Length of a hex-encoded SHA-256 digest
pub const SHA256_HEX_LENGTH: usize = SHA256_DIGEST_SIZE * 2;
