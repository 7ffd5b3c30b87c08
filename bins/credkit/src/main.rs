//! credkit: issue and verify stateless credentials from the command line.
//!
//! Secrets come from `credkit.toml` (or `--config`) and `CREDKIT_*_SECRET`
//! environment variables; see `credkit_core::config`.

use clap::{Parser, Subcommand};
use credkit_core::config::Config;
use credkit_core::error::exit_codes;
use credkit_telemetry::TelemetryConfig;
use std::process::ExitCode;

mod commands;
mod output;

use commands::{Context, api_key, issue, verify, webhook};

/// Issue and verify stateless credentials
#[derive(Parser)]
#[command(name = "credkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a credkit.toml configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Log filter directive, overrides the configured level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a token
    Issue {
        #[command(subcommand)]
        target: IssueTarget,
    },

    /// Verify a token of any kind and print its payload
    Verify {
        /// Token string
        token: String,
    },

    /// Decode a signed token's payload WITHOUT verifying it
    Inspect {
        /// Token string
        token: String,
    },

    /// Sign and verify webhook deliveries
    Webhook {
        #[command(subcommand)]
        action: WebhookAction,
    },

    /// Generate, hash, check and mask API keys
    ApiKey {
        #[command(subcommand)]
        action: ApiKeyAction,
    },

    /// Generate a workspace invitation token
    Invite,
}

#[derive(Subcommand)]
enum IssueTarget {
    /// Login session token
    Session {
        /// Subject (user id)
        #[arg(long)]
        sub: String,

        /// Lifetime in seconds (minimum 60)
        #[arg(long)]
        ttl: Option<i64>,
    },

    /// OIDC login state token
    OidcState {
        /// Workspace key
        #[arg(long)]
        workspace: String,

        /// Identity provider id
        #[arg(long)]
        provider: String,

        /// PKCE code verifier
        #[arg(long)]
        code_verifier: String,

        /// Nonce
        #[arg(long)]
        nonce: String,

        /// Redirect URI
        #[arg(long)]
        redirect_uri: String,

        /// Lifetime in seconds (minimum 60)
        #[arg(long)]
        ttl: Option<i64>,
    },

    /// GitHub App install state token
    GithubState {
        /// Workspace key
        #[arg(long)]
        workspace: String,

        /// User starting the install
        #[arg(long)]
        actor: String,

        /// Nonce
        #[arg(long)]
        nonce: String,

        /// Lifetime in seconds (minimum 60)
        #[arg(long)]
        ttl: Option<i64>,
    },

    /// One-time API key delivery token
    OneTimeKey {
        /// Stored API key record id
        #[arg(long)]
        api_key_id: String,

        /// Plaintext API key (a new one is generated when omitted)
        #[arg(long)]
        api_key: Option<String>,

        /// Owner of the key
        #[arg(long)]
        user_id: String,

        /// Lifetime in milliseconds
        #[arg(long)]
        ttl_ms: Option<i64>,
    },
}

#[derive(Subcommand)]
enum WebhookAction {
    /// Compute the sha256= signature header for a body
    Sign {
        /// Path to the raw body ("-" for stdin)
        #[arg(long, default_value = "-")]
        body: String,
    },

    /// Verify a signature header against a raw body
    Verify {
        /// Path to the raw body ("-" for stdin)
        #[arg(long, default_value = "-")]
        body: String,

        /// Value of the X-Hub-Signature-256 header
        #[arg(long)]
        signature: String,
    },

    /// Print installation.id from a webhook payload
    Installation {
        /// Path to the JSON body ("-" for stdin)
        #[arg(long, default_value = "-")]
        body: String,
    },
}

#[derive(Subcommand)]
enum ApiKeyAction {
    /// Generate a new API key with its storage hash
    Generate,

    /// Print the keyed (and optionally legacy) hash of a key
    Hash {
        /// API key
        key: String,

        /// Also print the legacy unkeyed hash
        #[arg(long)]
        legacy: bool,
    },

    /// Check a key against a stored hash
    Check {
        /// API key
        key: String,

        /// Stored hash
        #[arg(long)]
        stored: String,
    },

    /// Print the display-safe form of a key
    Mask {
        /// API key
        key: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output::report(&e, json);
            return ExitCode::from(exit_codes::CONFIG_ERROR as u8);
        }
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.schema.logging.level.clone());
    let telemetry = TelemetryConfig::with_level(level).json(config.schema.logging.json);
    if let Err(e) = credkit_telemetry::init_with_config(&telemetry) {
        output::Status::warning(&e.to_string());
    }

    let ctx = Context { config, json };

    let result = match cli.command {
        Commands::Issue { target } => match target {
            IssueTarget::Session { sub, ttl } => issue::session(&ctx, &sub, ttl),
            IssueTarget::OidcState {
                workspace,
                provider,
                code_verifier,
                nonce,
                redirect_uri,
                ttl,
            } => issue::oidc_state(
                &ctx,
                credkit_crypto::token::OidcStatePayload::new(
                    workspace,
                    provider,
                    code_verifier,
                    nonce,
                    redirect_uri,
                ),
                ttl,
            ),
            IssueTarget::GithubState {
                workspace,
                actor,
                nonce,
                ttl,
            } => issue::github_state(
                &ctx,
                credkit_crypto::token::GithubInstallStatePayload::new(workspace, actor, nonce),
                ttl,
            ),
            IssueTarget::OneTimeKey {
                api_key_id,
                api_key,
                user_id,
                ttl_ms,
            } => issue::one_time_key(&ctx, &api_key_id, api_key, &user_id, ttl_ms),
        },

        Commands::Verify { token } => verify::run(&ctx, &token),

        Commands::Inspect { token } => verify::inspect(&ctx, &token),

        Commands::Webhook { action } => match action {
            WebhookAction::Sign { body } => webhook::sign(&ctx, &body),
            WebhookAction::Verify { body, signature } => webhook::verify(&ctx, &body, &signature),
            WebhookAction::Installation { body } => webhook::installation(&ctx, &body),
        },

        Commands::ApiKey { action } => match action {
            ApiKeyAction::Generate => api_key::generate(&ctx),
            ApiKeyAction::Hash { key, legacy } => api_key::hash(&ctx, &key, legacy),
            ApiKeyAction::Check { key, stored } => api_key::check(&ctx, &key, &stored),
            ApiKeyAction::Mask { key } => api_key::mask(&ctx, &key),
        },

        Commands::Invite => api_key::invite(&ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::report(&e, json);
            ExitCode::from(exit_codes::for_code(e.code) as u8)
        }
    }
}
