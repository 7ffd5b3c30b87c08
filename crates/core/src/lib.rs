//! Core utilities for credkit
//!
//! This crate provides the ambient pieces shared by the credkit binaries:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based per-purpose secrets with environment overrides
//!
//! # Example
//!
//! ```rust,no_run
//! use credkit_core::config::{Config, SecretPurpose};
//!
//! let config = Config::load(None).expect("Invalid configuration");
//! let secret = config.require(SecretPurpose::Session).expect("No session secret");
//! # let _ = secret;
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, Secret, SecretProvider, SecretPurpose};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt, exit_codes};
}
