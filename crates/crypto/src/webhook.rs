//! GitHub-style webhook signature verification.
//!
//! The `X-Hub-Signature-256` header is `sha256=` followed by the lowercase
//! hex HMAC-SHA256 of the exact request body bytes. Verify against the raw
//! body; a re-serialized body will not match.

use serde_json::Value;

use crate::{constant_time_compare, hmac_sha256_hex};

/// Algorithm tag every signature header starts with.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Compute the signature header value for `body`.
pub fn sign(secret: &str, body: &[u8]) -> String {
    format!(
        "{SIGNATURE_PREFIX}{}",
        hmac_sha256_hex(secret.trim().as_bytes(), body)
    )
}

/// Verify a webhook signature header.
///
/// Returns `false` for an empty secret, a header without the `sha256=`
/// prefix, or any mismatch. Never panics.
pub fn verify_signature(secret: &str, body: &[u8], header: &str) -> bool {
    let secret = secret.trim();
    let header = header.trim();

    if secret.is_empty() {
        tracing::debug!(reason = "empty secret", "webhook signature rejected");
        return false;
    }
    if !header.starts_with(SIGNATURE_PREFIX) {
        tracing::debug!(reason = "missing sha256= prefix", "webhook signature rejected");
        return false;
    }

    let expected = sign(secret, body);
    let valid = constant_time_compare(expected.as_bytes(), header.as_bytes());
    if !valid {
        tracing::debug!(reason = "signature mismatch", "webhook signature rejected");
    }
    valid
}

/// Extract `installation.id` from a webhook payload.
///
/// Accepts a non-negative integral JSON number or a string of ASCII digits.
/// Anything else yields `None`.
pub fn parse_installation_id(payload: &Value) -> Option<u64> {
    match payload.get("installation")?.get("id")? {
        Value::Number(number) => {
            if let Some(id) = number.as_u64() {
                return Some(id);
            }
            let float = number.as_f64()?;
            if float >= 0.0 && float.fract() == 0.0 && float < u64::MAX as f64 {
                Some(float as u64)
            } else {
                None
            }
        }
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            text.parse().ok()
        }
        _ => None,
    }
}
