use credkit_crypto::api_key;
use credkit_crypto::token::{self, SessionPayload};
use rayon::prelude::*;
use std::collections::HashSet;

const SECRET: &str = "shared-secret";

#[test]
fn test_parallel_session_verification() {
    let token = token::issue_session("user-1", SECRET, 600).unwrap();

    let payloads: Vec<SessionPayload> = (0..256)
        .into_par_iter()
        .map(|_| token::verify_session(&token, SECRET).unwrap())
        .collect();

    assert!(payloads.iter().all(|p| p == &payloads[0]));
    assert_eq!(payloads[0].sub, "user-1");
}

#[test]
fn test_parallel_one_time_key_verification() {
    let token = token::issue_one_time_key("key-1", "ck_value", "user-1", SECRET, 60_000).unwrap();

    let results: Vec<_> = (0..128)
        .into_par_iter()
        .map(|_| token::verify_one_time_key(&token, SECRET))
        .collect();

    assert!(results.iter().all(|r| r.as_ref().map(|p| p.api_key.as_str()) == Ok("ck_value")));
}

#[test]
fn test_parallel_issuance_uses_fresh_nonces() {
    let tokens: Vec<String> = (0..256)
        .into_par_iter()
        .map(|_| token::issue_one_time_key("key-1", "ck_value", "user-1", SECRET, 60_000).unwrap())
        .collect();

    let nonces: HashSet<&str> = tokens
        .iter()
        .map(|t| t.split('.').nth(1).unwrap())
        .collect();
    assert_eq!(nonces.len(), tokens.len());
}

#[test]
fn test_parallel_key_generation_is_unique() {
    let keys: HashSet<String> = (0..1000)
        .into_par_iter()
        .map(|_| api_key::generate().unwrap())
        .collect();
    assert_eq!(keys.len(), 1000);
}
