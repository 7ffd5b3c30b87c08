//! Stateless credentials for credkit.
//!
//! This crate provides:
//! - Signed tokens (HMAC-SHA256) for sessions, OIDC state and GitHub install state
//! - Encrypted tokens (AES-256-GCM) for one-time API key delivery
//! - GitHub-style `sha256=` webhook signature verification
//! - API key generation, keyed/legacy hashing and masking
//! - Constant-time comparison for security
//!
//! Every operation is a pure in-memory computation. Verification functions
//! return [`Rejected`] for every failure cause so callers cannot be used as
//! an oracle; the detailed reason is only emitted as a `tracing` debug event.
//!
//! # Example
//!
//! ```rust
//! use credkit_crypto::token::{issue_session, verify_session};
//!
//! let token = issue_session("user-42", "session-secret", 3600).unwrap();
//! let payload = verify_session(&token, "session-secret").unwrap();
//! assert_eq!(payload.sub, "user-42");
//! assert!(verify_session(&token, "another-secret").is_err());
//! ```

#![warn(missing_docs)]

pub mod api_key;
pub mod codec;
mod error;
mod hmac_impl;
pub mod kdf;
mod timing;
pub mod token;
pub mod webhook;

pub use error::{CryptoError, Rejected, Result, TokenError};
pub use hmac_impl::{hmac_sha256, hmac_sha256_hex, sha256_hex, verify_signature};
pub use timing::constant_time_compare;
pub use token::{Payload, TokenKind, verify_any};
