//! `credkit api-key ...` and `credkit invite`

use super::{Context, issuance_error};
use crate::output;
use credkit_core::config::SecretPurpose;
use credkit_core::{Error, Result};
use credkit_crypto::api_key::{self, HashMatch};
use serde_json::json;

/// Generate a key and the hash to store for it
pub fn generate(ctx: &Context) -> Result<()> {
    let secret = ctx.secret(SecretPurpose::ApiKeyHash)?;
    let key = api_key::generate().map_err(issuance_error)?;
    let hash = api_key::hash(&key, secret);
    let masked = api_key::mask(&key);

    if ctx.json {
        output::json(&json!({ "api_key": key, "hash": hash, "masked": masked }));
    } else {
        output::field("api_key", &key);
        output::field("hash", &hash);
        output::field("masked", &masked);
    }
    Ok(())
}

/// Print the storage hash of a key
pub fn hash(ctx: &Context, key: &str, legacy: bool) -> Result<()> {
    let secret = ctx.secret(SecretPurpose::ApiKeyHash)?;
    let keyed = api_key::hash(key, secret);
    let legacy_hash = legacy.then(|| api_key::legacy_hash(key));

    if ctx.json {
        output::json(&json!({ "hash": keyed, "legacy_hash": legacy_hash }));
    } else {
        output::field("hash", &keyed);
        if let Some(legacy_hash) = legacy_hash {
            output::field("legacy_hash", legacy_hash);
        }
    }
    Ok(())
}

/// Check a key against a stored hash
pub fn check(ctx: &Context, key: &str, stored: &str) -> Result<()> {
    let secret = ctx.secret(SecretPurpose::ApiKeyHash)?;
    let matched = api_key::matches(key, secret, stored);

    let label = match matched {
        HashMatch::Keyed => "keyed",
        HashMatch::Legacy => "legacy",
        HashMatch::None => return Err(Error::token_rejected("api key")),
    };

    if ctx.json {
        output::json(&json!({ "valid": true, "match": label }));
    } else {
        output::Status::success(&format!("API key matches ({} hash)", label));
        if matched == HashMatch::Legacy {
            output::Status::warning("Stored hash uses the legacy scheme; rehash with `credkit api-key hash`");
        }
    }
    Ok(())
}

/// Print the display-safe form of a key
pub fn mask(ctx: &Context, key: &str) -> Result<()> {
    let masked = api_key::mask(key);
    if ctx.json {
        output::json(&json!({ "masked": masked }));
    } else {
        println!("{}", masked);
    }
    Ok(())
}

/// Generate a workspace invitation token
pub fn invite(ctx: &Context) -> Result<()> {
    let token = api_key::generate_invitation_token().map_err(issuance_error)?;
    if ctx.json {
        output::json(&json!({ "invitation_token": token }));
    } else {
        println!("{}", token);
    }
    Ok(())
}
