//! Integrity-protected tokens with a plaintext-visible payload.
//!
//! The HMAC is keyed directly with the secret bytes and covers the encoded
//! payload segment. The prefix is not signed; it is checked for equality
//! against the payload type before anything is decoded.

use chrono::Utc;

use super::{SignedClaims, TokenKind, reject};
use crate::{CryptoError, Rejected, Result, TokenError, codec, hmac_impl};

/// Lower bound applied to every requested TTL.
pub const MIN_TTL_SECS: i64 = 60;

/// Issue a token for `claims`, valid for `max(ttl_secs, 60)` seconds from now.
pub fn issue<P: SignedClaims>(claims: P, secret: &str, ttl_secs: i64) -> Result<String> {
    issue_at(claims, secret, ttl_secs, Utc::now().timestamp())
}

/// Issue a token as if the current time were `now` (epoch seconds).
pub fn issue_at<P: SignedClaims>(
    mut claims: P,
    secret: &str,
    ttl_secs: i64,
    now: i64,
) -> Result<String> {
    if secret.trim().is_empty() {
        return Err(CryptoError::EmptySecret);
    }

    let exp = now.saturating_add(ttl_secs.max(MIN_TTL_SECS));
    claims.set_validity(now, exp);

    let body = codec::encode_json(&claims)?;
    let signature = sign(&body, secret);
    Ok(format!("{}.{}.{}", P::KIND.prefix(), body, signature))
}

/// Verify `token` and return its payload.
pub fn verify<P: SignedClaims>(token: &str, secret: &str) -> std::result::Result<P, Rejected> {
    verify_at(token, secret, Utc::now().timestamp())
}

/// Verify `token` as if the current time were `now` (epoch seconds).
pub fn verify_at<P: SignedClaims>(
    token: &str,
    secret: &str,
    now: i64,
) -> std::result::Result<P, Rejected> {
    check::<P>(token, secret, now).map_err(|err| reject(P::KIND, err))
}

fn check<P: SignedClaims>(token: &str, secret: &str, now: i64) -> std::result::Result<P, TokenError> {
    if secret.trim().is_empty() {
        return Err(TokenError::EmptySecret);
    }

    let (body, signature) = split(token, P::KIND)?;

    let expected = sign(body, secret);
    hmac_impl::verify_signature(signature, &expected)?;

    let claims: P =
        codec::decode_json(body).map_err(|_| TokenError::Malformed("payload encoding"))?;
    claims.check_fields()?;

    if claims.expires_at() <= claims.issued_at() {
        return Err(TokenError::Malformed("validity window"));
    }
    if now >= claims.expires_at() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Decode the payload of a signed token WITHOUT checking its signature or
/// expiry.
///
/// The result is untrusted and must only be used for display or debugging.
pub fn inspect(token: &str) -> std::result::Result<serde_json::Value, Rejected> {
    let kind = TokenKind::of(token)
        .filter(|kind| kind.is_signed())
        .ok_or(Rejected)?;
    let (body, _) = split(token, kind).map_err(|err| reject(kind, err))?;
    codec::decode_json(body).map_err(|_| reject(kind, TokenError::Malformed("payload encoding")))
}

fn split(token: &str, kind: TokenKind) -> std::result::Result<(&str, &str), TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != kind.segments() {
        return Err(TokenError::Malformed("segment count"));
    }
    if parts[0] != kind.prefix() {
        return Err(TokenError::Malformed("prefix"));
    }
    Ok((parts[1], parts[2]))
}

fn sign(body: &str, secret: &str) -> String {
    codec::encode(hmac_impl::hmac_sha256(secret.as_bytes(), body.as_bytes()))
}
