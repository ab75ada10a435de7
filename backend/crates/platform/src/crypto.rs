//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};

/// Entropy of an API token key, in bytes
pub const TOKEN_KEY_BYTES: usize = 20;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a fresh API token key (40 lowercase hex characters)
pub fn generate_token_key() -> String {
    hex::encode(random_bytes(TOKEN_KEY_BYTES))
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
