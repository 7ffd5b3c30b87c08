//! URL- and header-safe text encoding.
//!
//! Base64url without padding: the output never contains `.`, `=`, `+` or
//! `/`, so it can be embedded in a `.`-delimited token, a query string or an
//! HTTP header without escaping.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors produced while decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input is not valid base64url
    #[error("invalid base64url: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded bytes are not valid UTF-8
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Decoded text is not the expected JSON record
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode raw bytes.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode text produced by [`encode`].
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(URL_SAFE_NO_PAD.decode(text)?)
}

/// Encode UTF-8 text.
pub fn encode_str(text: &str) -> String {
    encode(text.as_bytes())
}

/// Decode text produced by [`encode_str`].
pub fn decode_str(text: &str) -> Result<String, CodecError> {
    Ok(String::from_utf8(decode(text)?)?)
}

/// Serialize a record to compact JSON and encode it.
pub fn encode_json<T: Serialize>(value: &T) -> Result<String, CodecError> {
    Ok(encode(serde_json::to_vec(value)?))
}

/// Decode and deserialize a record produced by [`encode_json`].
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    Ok(serde_json::from_slice(&decode(text)?)?)
}
