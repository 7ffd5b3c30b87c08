//! Error types for the crypto crate.

use thiserror::Error;

use crate::codec::CodecError;

/// Result type alias for issuance and other fallible crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur while minting tokens or key material.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Secret was empty or whitespace only
    #[error("Secret must not be empty")]
    EmptySecret,

    /// Payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The operating system RNG failed
    #[error("Random source unavailable: {0}")]
    Random(String),

    /// AEAD encryption failed
    #[error("Encryption failed")]
    Encryption,

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(#[from] CodecError),
}

impl From<getrandom::Error> for CryptoError {
    fn from(err: getrandom::Error) -> Self {
        CryptoError::Random(err.to_string())
    }
}

/// Detailed reason a token failed verification.
///
/// Never returned to callers of the public `verify` functions; it is logged
/// and then collapsed into [`Rejected`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Wrong segment count, prefix or encoding
    #[error("malformed token: {0}")]
    Malformed(&'static str),

    /// Signature did not match the payload
    #[error("signature mismatch")]
    SignatureMismatch,

    /// Wrong key or tampered ciphertext/tag
    #[error("decryption failed")]
    DecryptionFailure,

    /// Token is past its expiry
    #[error("token expired")]
    Expired,

    /// A required payload field is absent or empty
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Verification secret was empty
    #[error("empty secret")]
    EmptySecret,
}

/// Uniform verification failure.
///
/// Carries no information about why verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("token rejected")]
pub struct Rejected;

impl From<TokenError> for Rejected {
    fn from(_: TokenError) -> Self {
        Rejected
    }
}
