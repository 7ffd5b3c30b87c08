//! `credkit issue ...`

use super::{Context, issuance_error};
use crate::output;
use credkit_core::config::SecretPurpose;
use credkit_core::Result;
use credkit_crypto::api_key;
use credkit_crypto::token::{self, GithubInstallStatePayload, OidcStatePayload, TokenKind};
use serde_json::json;

/// Issue a session token
pub fn session(ctx: &Context, sub: &str, ttl: Option<i64>) -> Result<()> {
    let secret = ctx.secret(SecretPurpose::Session)?;
    let ttl = ttl.unwrap_or(ctx.config.schema.ttl.session_secs);
    let token = token::issue_session(sub, secret, ttl).map_err(issuance_error)?;
    print_token(ctx, TokenKind::Session, &token, None);
    Ok(())
}

/// Issue an OIDC state token
pub fn oidc_state(ctx: &Context, state: OidcStatePayload, ttl: Option<i64>) -> Result<()> {
    let secret = ctx.secret(SecretPurpose::OidcState)?;
    let ttl = ttl.unwrap_or(ctx.config.schema.ttl.oidc_state_secs);
    let token = token::issue_oidc_state(state, secret, ttl).map_err(issuance_error)?;
    print_token(ctx, TokenKind::OidcState, &token, None);
    Ok(())
}

/// Issue a GitHub App install state token
pub fn github_state(
    ctx: &Context,
    state: GithubInstallStatePayload,
    ttl: Option<i64>,
) -> Result<()> {
    let secret = ctx.secret(SecretPurpose::GithubInstallState)?;
    let ttl = ttl.unwrap_or(ctx.config.schema.ttl.github_state_secs);
    let token = token::issue_github_install_state(state, secret, ttl).map_err(issuance_error)?;
    print_token(ctx, TokenKind::GithubInstallState, &token, None);
    Ok(())
}

/// Issue a one-time API key delivery token, generating the key if needed
pub fn one_time_key(
    ctx: &Context,
    api_key_id: &str,
    api_key: Option<String>,
    user_id: &str,
    ttl_ms: Option<i64>,
) -> Result<()> {
    let secret = ctx.secret(SecretPurpose::OneTimeKey)?;
    let ttl_ms = ttl_ms.unwrap_or(ctx.config.schema.ttl.one_time_key_ms);
    let key = match api_key {
        Some(key) => key,
        None => api_key::generate().map_err(issuance_error)?,
    };

    let token = token::issue_one_time_key(api_key_id, &key, user_id, secret, ttl_ms)
        .map_err(issuance_error)?;
    print_token(ctx, TokenKind::OneTimeKey, &token, Some(&api_key::mask(&key)));
    Ok(())
}

fn print_token(ctx: &Context, kind: TokenKind, token: &str, masked_key: Option<&str>) {
    if ctx.json {
        let mut doc = json!({ "kind": kind.to_string(), "token": token });
        if let Some(masked) = masked_key {
            doc["api_key_masked"] = json!(masked);
        }
        output::json(&doc);
    } else {
        println!("{}", token);
        if let Some(masked) = masked_key {
            output::Status::success(&format!("Sealed API key {}", masked));
        }
    }
    tracing::debug!(kind = %kind, "token issued");
}
