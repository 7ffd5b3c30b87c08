//! `credkit webhook ...`

use super::{Context, read_body};
use crate::output;
use credkit_core::config::SecretPurpose;
use credkit_core::{Error, Result};
use credkit_crypto::webhook;
use serde_json::json;

/// Print the signature header for a body
pub fn sign(ctx: &Context, body_path: &str) -> Result<()> {
    let secret = ctx.secret(SecretPurpose::GithubWebhook)?;
    let body = read_body(body_path)?;
    let header = webhook::sign(secret, &body);

    if ctx.json {
        output::json(&json!({ "signature": header }));
    } else {
        println!("{}", header);
    }
    Ok(())
}

/// Verify a signature header against a body
pub fn verify(ctx: &Context, body_path: &str, signature: &str) -> Result<()> {
    let secret = ctx.secret(SecretPurpose::GithubWebhook)?;
    let body = read_body(body_path)?;

    if !webhook::verify_signature(secret, &body, signature) {
        return Err(Error::signature_invalid());
    }

    if ctx.json {
        output::json(&json!({ "valid": true }));
    } else {
        output::Status::success("Signature valid");
    }
    Ok(())
}

/// Print `installation.id` from a JSON body
pub fn installation(ctx: &Context, body_path: &str) -> Result<()> {
    let body = read_body(body_path)?;
    let payload: serde_json::Value = serde_json::from_slice(&body)?;

    let id = webhook::parse_installation_id(&payload)
        .ok_or_else(|| Error::validation("Payload has no valid installation.id"))?;

    if ctx.json {
        output::json(&json!({ "installation_id": id }));
    } else {
        println!("{}", id);
    }
    Ok(())
}
