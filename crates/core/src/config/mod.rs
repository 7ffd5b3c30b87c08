//! Configuration loading and schema definitions
//!
//! Secrets are configured per purpose in the `[secrets]` table of
//! `credkit.toml` and may be overridden by `CREDKIT_*_SECRET` environment
//! variables.

mod loader;
mod schema;

pub use loader::{Config, LOG_LEVEL_ENV};
pub use schema::*;

/// Supplies the secret string for each purpose.
pub trait SecretProvider {
    /// Secret for `purpose`, if configured and not blank
    fn secret(&self, purpose: SecretPurpose) -> Option<&str>;
}

impl SecretProvider for SecretsConfig {
    fn secret(&self, purpose: SecretPurpose) -> Option<&str> {
        self.get(purpose).map(Secret::expose)
    }
}
