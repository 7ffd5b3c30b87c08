//! Configuration schema definitions

use serde::Deserialize;
use std::fmt;

/// Root configuration schema
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub secrets: SecretsConfig,

    #[serde(default)]
    pub ttl: TtlConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A secret string that never prints its value.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the secret value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// What a secret is used for. Each purpose has its own secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretPurpose {
    /// Signs login session tokens
    Session,
    /// Signs OIDC state tokens
    OidcState,
    /// Signs GitHub App install state tokens
    GithubInstallState,
    /// Verifies inbound GitHub webhook signatures
    GithubWebhook,
    /// Keys the stored API key hash
    ApiKeyHash,
    /// Encrypts one-time API key delivery tokens
    OneTimeKey,
}

impl SecretPurpose {
    /// All purposes
    pub const ALL: [SecretPurpose; 6] = [
        SecretPurpose::Session,
        SecretPurpose::OidcState,
        SecretPurpose::GithubInstallState,
        SecretPurpose::GithubWebhook,
        SecretPurpose::ApiKeyHash,
        SecretPurpose::OneTimeKey,
    ];

    /// Key in the `[secrets]` table
    pub fn key(&self) -> &'static str {
        match self {
            SecretPurpose::Session => "session",
            SecretPurpose::OidcState => "oidc_state",
            SecretPurpose::GithubInstallState => "github_state",
            SecretPurpose::GithubWebhook => "github_webhook",
            SecretPurpose::ApiKeyHash => "api_key_hash",
            SecretPurpose::OneTimeKey => "one_time_key",
        }
    }

    /// Environment variable that overrides the file value
    pub fn env_var(&self) -> &'static str {
        match self {
            SecretPurpose::Session => "CREDKIT_SESSION_SECRET",
            SecretPurpose::OidcState => "CREDKIT_OIDC_STATE_SECRET",
            SecretPurpose::GithubInstallState => "CREDKIT_GITHUB_STATE_SECRET",
            SecretPurpose::GithubWebhook => "CREDKIT_GITHUB_WEBHOOK_SECRET",
            SecretPurpose::ApiKeyHash => "CREDKIT_API_KEY_HASH_SECRET",
            SecretPurpose::OneTimeKey => "CREDKIT_ONE_TIME_KEY_SECRET",
        }
    }
}

impl fmt::Display for SecretPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-purpose secrets
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecretsConfig {
    #[serde(default)]
    pub session: Option<Secret>,

    #[serde(default)]
    pub oidc_state: Option<Secret>,

    #[serde(default)]
    pub github_state: Option<Secret>,

    #[serde(default)]
    pub github_webhook: Option<Secret>,

    #[serde(default)]
    pub api_key_hash: Option<Secret>,

    #[serde(default)]
    pub one_time_key: Option<Secret>,
}

impl SecretsConfig {
    /// Secret for `purpose`, ignoring blank values
    pub fn get(&self, purpose: SecretPurpose) -> Option<&Secret> {
        let slot = match purpose {
            SecretPurpose::Session => &self.session,
            SecretPurpose::OidcState => &self.oidc_state,
            SecretPurpose::GithubInstallState => &self.github_state,
            SecretPurpose::GithubWebhook => &self.github_webhook,
            SecretPurpose::ApiKeyHash => &self.api_key_hash,
            SecretPurpose::OneTimeKey => &self.one_time_key,
        };
        slot.as_ref().filter(|secret| !secret.is_blank())
    }

    /// Replace the secret for `purpose`
    pub fn set(&mut self, purpose: SecretPurpose, secret: Secret) {
        let slot = match purpose {
            SecretPurpose::Session => &mut self.session,
            SecretPurpose::OidcState => &mut self.oidc_state,
            SecretPurpose::GithubInstallState => &mut self.github_state,
            SecretPurpose::GithubWebhook => &mut self.github_webhook,
            SecretPurpose::ApiKeyHash => &mut self.api_key_hash,
            SecretPurpose::OneTimeKey => &mut self.one_time_key,
        };
        *slot = Some(secret);
    }
}

/// Token lifetimes
#[derive(Debug, Clone, Deserialize)]
pub struct TtlConfig {
    /// Session token lifetime in seconds
    #[serde(default = "default_session_secs")]
    pub session_secs: i64,

    /// OIDC state token lifetime in seconds
    #[serde(default = "default_state_secs")]
    pub oidc_state_secs: i64,

    /// GitHub install state token lifetime in seconds
    #[serde(default = "default_state_secs")]
    pub github_state_secs: i64,

    /// One-time key token lifetime in milliseconds
    #[serde(default = "default_one_time_key_ms")]
    pub one_time_key_ms: i64,
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            session_secs: default_session_secs(),
            oidc_state_secs: default_state_secs(),
            github_state_secs: default_state_secs(),
            one_time_key_ms: default_one_time_key_ms(),
        }
    }
}

fn default_session_secs() -> i64 {
    7 * 24 * 60 * 60
}

fn default_state_secs() -> i64 {
    10 * 60
}

fn default_one_time_key_ms() -> i64 {
    15 * 60 * 1000
}

/// Logging configuration, passed explicitly to the telemetry layer
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `credkit_crypto=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
