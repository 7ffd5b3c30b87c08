//! Payload records carried inside tokens.
//!
//! Field names are wire contracts. Every struct deserializes with defaults so
//! that an absent field surfaces as [`TokenError::MissingField`] from
//! `check_fields` instead of a generic parse failure.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::TokenKind;
use crate::TokenError;

/// A payload protected by the signed (HMAC) token scheme.
///
/// `iat`/`exp` are epoch seconds and are stamped at issuance.
pub trait SignedClaims: Serialize + DeserializeOwned {
    /// Token family; its prefix is checked before deserialization.
    const KIND: TokenKind;

    /// Stamp issued-at and expiry.
    fn set_validity(&mut self, iat: i64, exp: i64);

    /// Issued-at, epoch seconds.
    fn issued_at(&self) -> i64;

    /// Expiry, epoch seconds.
    fn expires_at(&self) -> i64;

    /// Ensure every required field is present and non-empty.
    fn check_fields(&self) -> Result<(), TokenError>;
}

fn require(field: &'static str, value: &str) -> Result<(), TokenError> {
    if value.is_empty() {
        Err(TokenError::MissingField(field))
    } else {
        Ok(())
    }
}

fn require_time(field: &'static str, value: i64) -> Result<(), TokenError> {
    if value <= 0 {
        Err(TokenError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Login session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPayload {
    /// Subject (user id)
    pub sub: String,
    /// Issued-at, epoch seconds
    pub iat: i64,
    /// Expiry, epoch seconds
    pub exp: i64,
}

impl SessionPayload {
    /// Session for `sub`; validity is stamped at issuance.
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            ..Self::default()
        }
    }
}

impl SignedClaims for SessionPayload {
    const KIND: TokenKind = TokenKind::Session;

    fn set_validity(&mut self, iat: i64, exp: i64) {
        self.iat = iat;
        self.exp = exp;
    }

    fn issued_at(&self) -> i64 {
        self.iat
    }

    fn expires_at(&self) -> i64 {
        self.exp
    }

    fn check_fields(&self) -> Result<(), TokenError> {
        require("sub", &self.sub)?;
        require_time("iat", self.iat)?;
        require_time("exp", self.exp)
    }
}

/// OIDC login state, bound to the redirect that started the flow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OidcStatePayload {
    /// Workspace the login targets
    pub workspace_key: String,
    /// Configured identity provider
    pub provider_id: String,
    /// PKCE code verifier
    pub code_verifier: String,
    /// Nonce echoed back in the ID token
    pub nonce: String,
    /// Redirect URI registered for the flow
    pub redirect_uri: String,
    /// Issued-at, epoch seconds
    pub iat: i64,
    /// Expiry, epoch seconds
    pub exp: i64,
}

impl OidcStatePayload {
    /// Build a state payload; validity is stamped at issuance.
    pub fn new(
        workspace_key: impl Into<String>,
        provider_id: impl Into<String>,
        code_verifier: impl Into<String>,
        nonce: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            workspace_key: workspace_key.into(),
            provider_id: provider_id.into(),
            code_verifier: code_verifier.into(),
            nonce: nonce.into(),
            redirect_uri: redirect_uri.into(),
            iat: 0,
            exp: 0,
        }
    }
}

impl SignedClaims for OidcStatePayload {
    const KIND: TokenKind = TokenKind::OidcState;

    fn set_validity(&mut self, iat: i64, exp: i64) {
        self.iat = iat;
        self.exp = exp;
    }

    fn issued_at(&self) -> i64 {
        self.iat
    }

    fn expires_at(&self) -> i64 {
        self.exp
    }

    fn check_fields(&self) -> Result<(), TokenError> {
        require("workspace_key", &self.workspace_key)?;
        require("provider_id", &self.provider_id)?;
        require("code_verifier", &self.code_verifier)?;
        require("nonce", &self.nonce)?;
        require("redirect_uri", &self.redirect_uri)?;
        require_time("iat", self.iat)?;
        require_time("exp", self.exp)
    }
}

/// GitHub App installation linking state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubInstallStatePayload {
    /// Workspace the installation is linked to
    pub workspace_key: String,
    /// User who started the install flow
    pub actor_user_id: String,
    /// Random nonce
    pub nonce: String,
    /// Issued-at, epoch seconds
    pub iat: i64,
    /// Expiry, epoch seconds
    pub exp: i64,
}

impl GithubInstallStatePayload {
    /// Build a state payload; validity is stamped at issuance.
    pub fn new(
        workspace_key: impl Into<String>,
        actor_user_id: impl Into<String>,
        nonce: impl Into<String>,
    ) -> Self {
        Self {
            workspace_key: workspace_key.into(),
            actor_user_id: actor_user_id.into(),
            nonce: nonce.into(),
            iat: 0,
            exp: 0,
        }
    }
}

impl SignedClaims for GithubInstallStatePayload {
    const KIND: TokenKind = TokenKind::GithubInstallState;

    fn set_validity(&mut self, iat: i64, exp: i64) {
        self.iat = iat;
        self.exp = exp;
    }

    fn issued_at(&self) -> i64 {
        self.iat
    }

    fn expires_at(&self) -> i64 {
        self.exp
    }

    fn check_fields(&self) -> Result<(), TokenError> {
        require("workspace_key", &self.workspace_key)?;
        require("actor_user_id", &self.actor_user_id)?;
        require("nonce", &self.nonce)?;
        require_time("iat", self.iat)?;
        require_time("exp", self.exp)
    }
}

/// One-time delivery of a freshly generated API key.
///
/// `exp` is epoch **milliseconds**, unlike the signed payloads.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OneTimeKeyPayload {
    /// Stored API key record id
    pub api_key_id: String,
    /// Plaintext API key
    pub api_key: String,
    /// Owner of the key
    pub user_id: String,
    /// Expiry, epoch milliseconds
    pub exp: i64,
}

impl OneTimeKeyPayload {
    /// Build a payload; `exp` is set at issuance.
    pub fn new(
        api_key_id: impl Into<String>,
        api_key: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key_id: api_key_id.into(),
            api_key: api_key.into(),
            user_id: user_id.into(),
            exp: 0,
        }
    }

    pub(crate) fn check_fields(&self) -> Result<(), TokenError> {
        require("api_key_id", &self.api_key_id)?;
        require("api_key", &self.api_key)?;
        require("user_id", &self.user_id)?;
        require_time("exp", self.exp)
    }
}

impl fmt::Debug for OneTimeKeyPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneTimeKeyPayload")
            .field("api_key_id", &self.api_key_id)
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("exp", &self.exp)
            .finish()
    }
}
