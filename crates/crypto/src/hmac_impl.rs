//! HMAC-SHA256 and plain SHA-256 helpers.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Generate an HMAC-SHA256 tag.
///
/// # Arguments
/// * `key` - Secret key bytes, any length
/// * `message` - Message to sign
///
/// # Returns
/// The raw 32-byte tag
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key)
        .expect("HMAC can take key of any size");
    mac.update(message);
    let mut tag = [0u8; 32];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}

/// Generate an HMAC-SHA256 tag as a lowercase hex string.
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> String {
    hex::encode(hmac_sha256(key, message))
}

/// Unkeyed SHA-256 digest as a lowercase hex string.
pub fn sha256_hex(message: &[u8]) -> String {
    hex::encode(Sha256::digest(message))
}

/// Verify a signature against an expected value.
///
/// # Arguments
/// * `signature` - The signature to verify
/// * `expected` - The expected signature
///
/// # Returns
/// Ok(()) if signatures match, Err otherwise
pub fn verify_signature(signature: &str, expected: &str) -> Result<(), TokenError> {
    if crate::constant_time_compare(signature.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(TokenError::SignatureMismatch)
    }
}
