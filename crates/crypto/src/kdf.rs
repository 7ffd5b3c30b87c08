//! Key derivation for the encrypted token scheme.
//!
//! A single SHA-256 pass turns an arbitrary-length secret into the 32-byte
//! key AES-256-GCM requires. Callers are responsible for secret strength.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of a derived key in bytes.
pub const KEY_LEN: usize = 32;

/// Derived key material, wiped when dropped.
pub type DerivedKey = Zeroizing<[u8; KEY_LEN]>;

/// Derive a fixed-length key from `secret`.
pub fn derive_key(secret: &str) -> DerivedKey {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&Sha256::digest(secret.as_bytes()));
    key
}
