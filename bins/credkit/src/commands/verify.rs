//! `credkit verify` and `credkit inspect`

use super::{Context, purpose_for};
use crate::output;
use chrono::{DateTime, Utc};
use credkit_core::{Error, Result};
use credkit_crypto::token::{self, Payload, TokenKind, signed};
use serde_json::{Value, json};

/// Verify a token and print its payload
pub fn run(ctx: &Context, token: &str) -> Result<()> {
    let kind = TokenKind::of(token).ok_or_else(|| Error::token_rejected("unrecognized"))?;
    let secret = ctx.secret(purpose_for(kind))?;

    let payload = token::verify_any(token, secret)
        .map_err(|_| Error::token_rejected(&kind.to_string()))?;
    let body = payload_json(&payload)?;

    if ctx.json {
        output::json(&json!({ "kind": kind.to_string(), "valid": true, "payload": body }));
    } else {
        output::Status::success(&format!("Valid {} token", kind));
        print_fields(kind, &body);
    }
    Ok(())
}

/// Decode a signed token without verifying it
pub fn inspect(ctx: &Context, token: &str) -> Result<()> {
    let kind = TokenKind::of(token)
        .filter(|kind| kind.is_signed())
        .ok_or_else(|| {
            Error::validation("Only signed tokens can be inspected")
                .with_suggestion("One-time key tokens are encrypted; use `credkit verify`")
        })?;
    let body = signed::inspect(token)
        .map_err(|_| Error::validation(format!("Malformed {} token", kind)))?;

    if ctx.json {
        output::json(&json!({ "kind": kind.to_string(), "verified": false, "payload": body }));
    } else {
        output::Status::warning("Payload decoded WITHOUT signature or expiry checks");
        print_fields(kind, &body);
    }
    Ok(())
}

fn payload_json(payload: &Payload) -> Result<Value> {
    let value = match payload {
        Payload::Session(p) => serde_json::to_value(p)?,
        Payload::OidcState(p) => serde_json::to_value(p)?,
        Payload::GithubInstallState(p) => serde_json::to_value(p)?,
        Payload::OneTimeKey(p) => serde_json::to_value(p)?,
    };
    Ok(value)
}

fn print_fields(kind: TokenKind, body: &Value) {
    let Some(fields) = body.as_object() else {
        output::json(body);
        return;
    };
    for (name, value) in fields {
        match (name.as_str(), value.as_i64()) {
            ("iat" | "exp", Some(ts)) => output::field(name, format_timestamp(kind, ts)),
            _ => match value.as_str() {
                Some(text) => output::field(name, text),
                None => output::field(name, value),
            },
        }
    }
}

/// Render an `iat`/`exp` value; one-time key tokens use milliseconds
fn format_timestamp(kind: TokenKind, ts: i64) -> String {
    let parsed = if kind == TokenKind::OneTimeKey {
        DateTime::<Utc>::from_timestamp_millis(ts)
    } else {
        DateTime::<Utc>::from_timestamp(ts, 0)
    };
    match parsed {
        Some(at) => format!("{} ({})", ts, at.to_rfc3339()),
        None => ts.to_string(),
    }
}
