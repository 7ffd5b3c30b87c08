//! Command implementations

pub mod api_key;
pub mod issue;
pub mod verify;
pub mod webhook;

use credkit_core::config::{Config, SecretPurpose};
use credkit_core::{Error, Result, ResultExt};
use credkit_crypto::CryptoError;
use credkit_crypto::token::TokenKind;
use std::io::Read;

/// Shared state for every command
pub struct Context {
    pub config: Config,
    pub json: bool,
}

impl Context {
    /// Secret for `purpose` or a configuration error
    pub fn secret(&self, purpose: SecretPurpose) -> Result<&str> {
        self.config.require(purpose)
    }
}

/// Secret purpose that protects tokens of `kind`
pub fn purpose_for(kind: TokenKind) -> SecretPurpose {
    match kind {
        TokenKind::Session => SecretPurpose::Session,
        TokenKind::OidcState => SecretPurpose::OidcState,
        TokenKind::GithubInstallState => SecretPurpose::GithubInstallState,
        TokenKind::OneTimeKey => SecretPurpose::OneTimeKey,
    }
}

/// Map an issuance failure onto the CLI error type
pub fn issuance_error(err: CryptoError) -> Error {
    Error::issuance(err.to_string()).with_source(err)
}

/// Read a raw body from a path, or stdin for "-"
pub fn read_body(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut body = Vec::new();
        std::io::stdin()
            .read_to_end(&mut body)
            .map_err(|e| Error::io("Failed to read body from stdin").with_source(e))?;
        Ok(body)
    } else {
        std::fs::read(path)
            .map_err(Error::from)
            .context(format!("While reading body {}", path))
            .with_suggestion("Pass a readable file, or \"-\" to read stdin")
    }
}
