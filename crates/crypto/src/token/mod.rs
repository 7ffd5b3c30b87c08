//! Stateless tokens.
//!
//! Each token family has a fixed wire prefix that doubles as the
//! discriminant of [`Payload`]:
//!
//! | Kind | Format |
//! |---|---|
//! | Session | `cs1.<payload>.<hmac>` |
//! | OIDC state | `oidc1.<payload>.<hmac>` |
//! | GitHub install state | `ghs1.<payload>.<hmac>` |
//! | One-time API key | `otk1.<iv>.<ciphertext>.<tag>` |
//!
//! Segments are base64url without padding.

pub mod encrypted;
mod payload;
pub mod signed;

pub use payload::{
    GithubInstallStatePayload, OidcStatePayload, OneTimeKeyPayload, SessionPayload, SignedClaims,
};

use crate::{Rejected, Result, TokenError};

/// Token family, identified by its wire prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Login session (signed)
    Session,
    /// OIDC login state (signed)
    OidcState,
    /// GitHub App install state (signed)
    GithubInstallState,
    /// One-time API key delivery (encrypted)
    OneTimeKey,
}

impl TokenKind {
    /// All token kinds.
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Session,
        TokenKind::OidcState,
        TokenKind::GithubInstallState,
        TokenKind::OneTimeKey,
    ];

    /// Wire prefix.
    pub const fn prefix(self) -> &'static str {
        match self {
            TokenKind::Session => "cs1",
            TokenKind::OidcState => "oidc1",
            TokenKind::GithubInstallState => "ghs1",
            TokenKind::OneTimeKey => "otk1",
        }
    }

    /// Number of `.`-separated segments, prefix included.
    pub const fn segments(self) -> usize {
        match self {
            TokenKind::OneTimeKey => 4,
            _ => 3,
        }
    }

    /// Whether the payload travels in plaintext under an HMAC.
    pub const fn is_signed(self) -> bool {
        !matches!(self, TokenKind::OneTimeKey)
    }

    /// Look up a kind by prefix.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }

    /// Read the kind of `token` from its prefix, without decoding anything.
    pub fn of(token: &str) -> Option<Self> {
        let prefix = token.split('.').next()?;
        Self::from_prefix(prefix)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Session => "session",
            TokenKind::OidcState => "oidc_state",
            TokenKind::GithubInstallState => "github_install_state",
            TokenKind::OneTimeKey => "one_time_key",
        };
        f.write_str(name)
    }
}

/// A verified payload of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Login session
    Session(SessionPayload),
    /// OIDC login state
    OidcState(OidcStatePayload),
    /// GitHub App install state
    GithubInstallState(GithubInstallStatePayload),
    /// One-time API key delivery
    OneTimeKey(OneTimeKeyPayload),
}

impl Payload {
    /// Kind of the token this payload came from.
    pub fn kind(&self) -> TokenKind {
        match self {
            Payload::Session(_) => TokenKind::Session,
            Payload::OidcState(_) => TokenKind::OidcState,
            Payload::GithubInstallState(_) => TokenKind::GithubInstallState,
            Payload::OneTimeKey(_) => TokenKind::OneTimeKey,
        }
    }
}

/// Verify a token of any kind, dispatching on its prefix.
///
/// `secret` must be the secret of the token's family; callers that hold
/// several secrets look the kind up with [`TokenKind::of`] first.
pub fn verify_any(token: &str, secret: &str) -> std::result::Result<Payload, Rejected> {
    match TokenKind::of(token) {
        Some(TokenKind::Session) => signed::verify(token, secret).map(Payload::Session),
        Some(TokenKind::OidcState) => signed::verify(token, secret).map(Payload::OidcState),
        Some(TokenKind::GithubInstallState) => {
            signed::verify(token, secret).map(Payload::GithubInstallState)
        }
        Some(TokenKind::OneTimeKey) => encrypted::verify(token, secret).map(Payload::OneTimeKey),
        None => {
            tracing::debug!(reason = "unknown prefix", "token rejected");
            Err(Rejected)
        }
    }
}

/// Log the detailed reason and collapse it.
pub(crate) fn reject(kind: TokenKind, err: TokenError) -> Rejected {
    tracing::debug!(kind = %kind, reason = %err, "token rejected");
    Rejected::from(err)
}

/// Issue a session token for `sub`.
pub fn issue_session(sub: &str, secret: &str, ttl_secs: i64) -> Result<String> {
    signed::issue(SessionPayload::new(sub), secret, ttl_secs)
}

/// Verify a session token.
pub fn verify_session(token: &str, secret: &str) -> std::result::Result<SessionPayload, Rejected> {
    signed::verify(token, secret)
}

/// Issue an OIDC state token.
pub fn issue_oidc_state(state: OidcStatePayload, secret: &str, ttl_secs: i64) -> Result<String> {
    signed::issue(state, secret, ttl_secs)
}

/// Verify an OIDC state token.
pub fn verify_oidc_state(
    token: &str,
    secret: &str,
) -> std::result::Result<OidcStatePayload, Rejected> {
    signed::verify(token, secret)
}

/// Issue a GitHub App install state token.
pub fn issue_github_install_state(
    state: GithubInstallStatePayload,
    secret: &str,
    ttl_secs: i64,
) -> Result<String> {
    signed::issue(state, secret, ttl_secs)
}

/// Verify a GitHub App install state token.
pub fn verify_github_install_state(
    token: &str,
    secret: &str,
) -> std::result::Result<GithubInstallStatePayload, Rejected> {
    signed::verify(token, secret)
}

/// Issue a one-time API key delivery token valid for `ttl_ms` milliseconds.
pub fn issue_one_time_key(
    api_key_id: &str,
    api_key: &str,
    user_id: &str,
    secret: &str,
    ttl_ms: i64,
) -> Result<String> {
    let expires_at_ms = encrypted::now_ms().saturating_add(ttl_ms);
    encrypted::issue(
        OneTimeKeyPayload::new(api_key_id, api_key, user_id),
        secret,
        expires_at_ms,
    )
}

/// Verify a one-time API key delivery token.
pub fn verify_one_time_key(
    token: &str,
    secret: &str,
) -> std::result::Result<OneTimeKeyPayload, Rejected> {
    encrypted::verify(token, secret)
}
