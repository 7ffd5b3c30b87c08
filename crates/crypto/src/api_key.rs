//! API key and invitation token codec.
//!
//! Keys are `ck_` followed by 36 random bytes in base64url; invitation
//! tokens are `inv_` followed by 32 random bytes. Uniqueness is left to the
//! storage layer.
//!
//! Stored keys are looked up by [`hash`] (HMAC-SHA256 under a server
//! secret). [`legacy_hash`] (plain SHA-256) exists only so keys minted before
//! keyed hashing can still be validated during migration; never store it for
//! new keys.

use zeroize::Zeroizing;

use crate::{Result, codec, constant_time_compare, hmac_sha256_hex, sha256_hex};

/// Prefix of every API key.
pub const API_KEY_PREFIX: &str = "ck_";

/// Prefix of every workspace invitation token.
pub const INVITATION_PREFIX: &str = "inv_";

/// Random bytes in an API key.
pub const API_KEY_ENTROPY_BYTES: usize = 36;

/// Random bytes in an invitation token.
pub const INVITATION_ENTROPY_BYTES: usize = 32;

const MASK_VISIBLE_HEAD: usize = 6;
const MASK_VISIBLE_TAIL: usize = 4;
const MASK_MIN_LEN: usize = 10;

/// Generate a new API key.
pub fn generate() -> Result<String> {
    random_token(API_KEY_PREFIX, API_KEY_ENTROPY_BYTES)
}

/// Generate a new workspace invitation token.
pub fn generate_invitation_token() -> Result<String> {
    random_token(INVITATION_PREFIX, INVITATION_ENTROPY_BYTES)
}

fn random_token(prefix: &str, entropy_bytes: usize) -> Result<String> {
    let mut random_bytes = Zeroizing::new(vec![0u8; entropy_bytes]);
    getrandom::getrandom(&mut random_bytes)?;
    Ok(format!("{prefix}{}", codec::encode(random_bytes.as_slice())))
}

/// Keyed hash of `value` for storage and lookup (lowercase hex HMAC-SHA256).
pub fn hash(value: &str, secret: &str) -> String {
    hmac_sha256_hex(secret.as_bytes(), value.as_bytes())
}

/// Unkeyed hash of `value` (lowercase hex SHA-256), for pre-migration keys.
pub fn legacy_hash(value: &str) -> String {
    sha256_hex(value.as_bytes())
}

/// Which stored hash form a presented key matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashMatch {
    /// Matched the keyed hash
    Keyed,
    /// Matched only the legacy unkeyed hash; the row should be rehashed
    Legacy,
    /// No match
    None,
}

impl HashMatch {
    /// Whether the key is accepted.
    pub fn is_match(self) -> bool {
        !matches!(self, HashMatch::None)
    }
}

/// Check a presented key against a stored hash, keyed form first.
pub fn matches(value: &str, secret: &str, stored_hash: &str) -> HashMatch {
    let stored = stored_hash.trim().to_ascii_lowercase();
    if !secret.is_empty() && constant_time_compare(hash(value, secret).as_bytes(), stored.as_bytes())
    {
        HashMatch::Keyed
    } else if constant_time_compare(legacy_hash(value).as_bytes(), stored.as_bytes()) {
        HashMatch::Legacy
    } else {
        HashMatch::None
    }
}

/// Display-safe form of a key: first 6 and last 4 characters.
///
/// Values of 10 characters or fewer are returned unchanged.
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= MASK_MIN_LEN {
        return value.to_string();
    }
    let head: String = chars[..MASK_VISIBLE_HEAD].iter().collect();
    let tail: String = chars[chars.len() - MASK_VISIBLE_TAIL..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generate_shape() {
        let key = generate().unwrap();
        assert!(key.starts_with(API_KEY_PREFIX));
        // 36 bytes -> 48 base64url chars
        assert_eq!(key.len(), API_KEY_PREFIX.len() + 48);
        let body = &key[API_KEY_PREFIX.len()..];
        assert_eq!(codec::decode(body).unwrap().len(), API_KEY_ENTROPY_BYTES);
    }

    #[test]
    fn test_generate_invitation_shape() {
        let token = generate_invitation_token().unwrap();
        assert!(token.starts_with(INVITATION_PREFIX));
        let body = &token[INVITATION_PREFIX.len()..];
        assert_eq!(codec::decode(body).unwrap().len(), INVITATION_ENTROPY_BYTES);
    }

    #[test]
    fn test_generate_is_unique() {
        let keys: std::collections::HashSet<String> =
            (0..1000).map(|_| generate().unwrap()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_hash_is_keyed() {
        let key = "ck_example";
        assert_eq!(hash(key, "a"), hash(key, "a"));
        assert_ne!(hash(key, "a"), hash(key, "b"));
        assert_ne!(hash(key, "a"), legacy_hash(key));
        assert_eq!(hash(key, "a").len(), 64);
    }

    #[test]
    fn test_legacy_hash_is_sha256() {
        assert_eq!(
            legacy_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_matches_keyed_and_legacy() {
        let key = generate().unwrap();
        assert_eq!(matches(&key, "pepper", &hash(&key, "pepper")), HashMatch::Keyed);
        assert_eq!(matches(&key, "pepper", &legacy_hash(&key)), HashMatch::Legacy);
        assert_eq!(
            matches(&key, "pepper", &hash(&key, "pepper").to_uppercase()),
            HashMatch::Keyed
        );
        assert_eq!(matches(&key, "other", &hash(&key, "pepper")), HashMatch::None);
        assert!(!matches("ck_wrong", "pepper", &hash(&key, "pepper")).is_match());
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("ck_abcdefghijklmnop"), "ck_abc...mnop");
        assert_eq!(mask("0123456789"), "0123456789");
        assert_eq!(mask("01234567890"), "012345...7890");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_mask_counts_characters() {
        assert_eq!(mask("ééééééééééé"), "éééééé...éééé");
    }

    proptest! {
        #[test]
        fn mask_hides_middle(value in "[a-z0-9]{11,64}") {
            let masked = mask(&value);
            prop_assert_eq!(masked.len(), 6 + 3 + 4);
            prop_assert!(masked.starts_with(&value[..6]));
            prop_assert!(masked.ends_with(&value[value.len() - 4..]));
        }

        #[test]
        fn mask_keeps_short_values(value in "[a-z0-9]{0,10}") {
            prop_assert_eq!(mask(&value), value);
        }
    }
}
