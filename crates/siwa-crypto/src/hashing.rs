//! SHA-256 hashing for nonce commitments.

use crate::constants::SHA256_DIGEST_SIZE;
use sha2::{Digest, Sha256};

/// Hash data using SHA-256
pub fn sha256(data: &[u8]) -> [u8; SHA256_DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 of the UTF-8 bytes of `input`, as lowercase hex.
///
/// This is the value sent to the identity provider in place of the raw
/// nonce; the provider echoes it back inside the identity token.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(sha256(input.as_bytes()))
}
