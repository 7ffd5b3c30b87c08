//! Confidential tokens for one-time API key delivery.
//!
//! The payload carries a plaintext API key, so it is sealed with AES-256-GCM
//! under a key derived from the secret. A fresh random 12-byte nonce is drawn
//! for every token; nonce reuse under one key breaks GCM confidentiality.
//!
//! Expiry is in epoch milliseconds and a token is still valid when
//! `now_ms == exp`.

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use chrono::Utc;
use zeroize::Zeroizing;

use super::{OneTimeKeyPayload, TokenKind, reject};
use crate::{CryptoError, Rejected, Result, TokenError, codec, kdf};

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

const KIND: TokenKind = TokenKind::OneTimeKey;

/// Current time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Seal `payload` with an expiry of `expires_at_ms` (epoch milliseconds).
pub fn issue(mut payload: OneTimeKeyPayload, secret: &str, expires_at_ms: i64) -> Result<String> {
    if secret.trim().is_empty() {
        return Err(CryptoError::EmptySecret);
    }
    payload.exp = expires_at_ms;

    let key = kdf::derive_key(secret);
    let cipher = Aes256Gcm::new_from_slice(key.as_slice()).map_err(|_| CryptoError::Encryption)?;

    let mut nonce = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut nonce)?;

    let mut buffer = Zeroizing::new(serde_json::to_vec(&payload)?);
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", buffer.as_mut_slice())
        .map_err(|_| CryptoError::Encryption)?;

    Ok(format!(
        "{}.{}.{}.{}",
        KIND.prefix(),
        codec::encode(nonce),
        codec::encode(buffer.as_slice()),
        codec::encode(tag.as_slice())
    ))
}

/// Open `token` and return its payload.
pub fn verify(token: &str, secret: &str) -> std::result::Result<OneTimeKeyPayload, Rejected> {
    verify_at(token, secret, now_ms())
}

/// Open `token` as if the current time were `now_ms` (epoch milliseconds).
pub fn verify_at(
    token: &str,
    secret: &str,
    now_ms: i64,
) -> std::result::Result<OneTimeKeyPayload, Rejected> {
    check(token, secret, now_ms).map_err(|err| reject(KIND, err))
}

fn check(
    token: &str,
    secret: &str,
    now_ms: i64,
) -> std::result::Result<OneTimeKeyPayload, TokenError> {
    if secret.trim().is_empty() {
        return Err(TokenError::EmptySecret);
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != KIND.segments() {
        return Err(TokenError::Malformed("segment count"));
    }
    if parts[0] != KIND.prefix() {
        return Err(TokenError::Malformed("prefix"));
    }

    let nonce = codec::decode(parts[1]).map_err(|_| TokenError::Malformed("iv encoding"))?;
    let mut buffer = Zeroizing::new(
        codec::decode(parts[2]).map_err(|_| TokenError::Malformed("ciphertext encoding"))?,
    );
    let tag = codec::decode(parts[3]).map_err(|_| TokenError::Malformed("tag encoding"))?;

    if nonce.len() != NONCE_LEN {
        return Err(TokenError::Malformed("iv length"));
    }
    if tag.len() != TAG_LEN {
        return Err(TokenError::Malformed("tag length"));
    }

    let key = kdf::derive_key(secret);
    let cipher =
        Aes256Gcm::new_from_slice(key.as_slice()).map_err(|_| TokenError::DecryptionFailure)?;
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&nonce),
            b"",
            buffer.as_mut_slice(),
            Tag::from_slice(&tag),
        )
        .map_err(|_| TokenError::DecryptionFailure)?;

    let payload: OneTimeKeyPayload = serde_json::from_slice(buffer.as_slice())
        .map_err(|_| TokenError::Malformed("payload"))?;
    payload.check_fields()?;

    if now_ms > payload.exp {
        return Err(TokenError::Expired);
    }

    Ok(payload)
}
