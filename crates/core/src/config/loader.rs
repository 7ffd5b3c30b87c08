//! Configuration file loading and environment overrides

use super::SecretProvider;
use super::schema::{ConfigSchema, Secret, SecretPurpose};
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Environment variable overriding the log level
pub const LOG_LEVEL_ENV: &str = "CREDKIT_LOG_LEVEL";

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path (or a standard location), then
    /// apply environment overrides
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a file path or standard location, without
    /// environment overrides
    pub fn load_file(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !Path::new(p).exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_string()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(Self {
            schema: toml::from_str(content)?,
            path: None,
        })
    }

    /// Apply overrides from `lookup` (normally the process environment).
    /// Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for purpose in SecretPurpose::ALL {
            if let Some(value) = lookup(purpose.env_var()).filter(|v| !v.trim().is_empty()) {
                self.schema.secrets.set(purpose, Secret::new(value));
            }
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.schema.logging.level = level;
        }
    }

    /// Secret for `purpose`, or an error naming where to configure it
    pub fn require(&self, purpose: SecretPurpose) -> Result<&str> {
        self.secret(purpose)
            .ok_or_else(|| Error::missing_secret(purpose.key(), purpose.env_var()))
    }
}

impl SecretProvider for Config {
    fn secret(&self, purpose: SecretPurpose) -> Option<&str> {
        self.schema.secrets.secret(purpose)
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = ["credkit.toml", ".credkit.toml", ".config/credkit.toml"];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file: {}", e)).with_source(e))
        .context(format!("While reading config file {}", path))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("While parsing config file {}", path))
        .with_suggestion("Only the [secrets], [ttl] and [logging] tables are recognized")
}
