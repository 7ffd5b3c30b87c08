use credkit_crypto::token::{
    self, GithubInstallStatePayload, OidcStatePayload, SessionPayload, encrypted, signed,
};
use credkit_crypto::{Rejected, webhook};
use proptest::prelude::*;

const SECRET: &str = "test-secret-value";
const NOW: i64 = 1_700_000_000;

fn replace_char_at(s: &str, index: usize) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    chars[index] = match chars[index] {
        'A' => 'B',
        _ => 'A',
    };
    chars.into_iter().collect()
}

#[test]
fn test_every_single_char_change_in_payload_or_signature_is_rejected() {
    let token = signed::issue_at(SessionPayload::new("user-1"), SECRET, 600, NOW).unwrap();
    let prefix_len = "cs1.".len();

    for index in prefix_len..token.len() {
        if token.as_bytes()[index] == b'.' {
            continue;
        }
        let tampered = replace_char_at(&token, index);
        assert_eq!(
            signed::verify_at::<SessionPayload>(&tampered, SECRET, NOW),
            Err(Rejected),
            "accepted tampered token at index {index}"
        );
    }
}

#[test]
fn test_payload_swap_between_tokens_is_rejected() {
    let alice = signed::issue_at(SessionPayload::new("alice"), SECRET, 600, NOW).unwrap();
    let mallory = signed::issue_at(SessionPayload::new("mallory"), SECRET, 600, NOW).unwrap();

    let alice_parts: Vec<&str> = alice.split('.').collect();
    let mallory_parts: Vec<&str> = mallory.split('.').collect();
    let spliced = format!("cs1.{}.{}", alice_parts[1], mallory_parts[2]);

    assert!(signed::verify_at::<SessionPayload>(&spliced, SECRET, NOW).is_err());
}

#[test]
fn test_extra_segments_are_rejected() {
    let token = signed::issue_at(SessionPayload::new("user-1"), SECRET, 600, NOW).unwrap();
    assert!(signed::verify_at::<SessionPayload>(&format!("{token}.extra"), SECRET, NOW).is_err());
    assert!(signed::verify_at::<SessionPayload>(&format!("x.{token}"), SECRET, NOW).is_err());
}

#[test]
fn test_state_tokens_reject_wrong_secret() {
    let oidc = signed::issue_at(
        OidcStatePayload::new("ws", "google", "verifier", "nonce", "https://app/callback"),
        SECRET,
        600,
        NOW,
    )
    .unwrap();
    let gh = signed::issue_at(
        GithubInstallStatePayload::new("ws", "user-9", "nonce"),
        SECRET,
        600,
        NOW,
    )
    .unwrap();

    assert!(signed::verify_at::<OidcStatePayload>(&oidc, "other", NOW).is_err());
    assert!(signed::verify_at::<GithubInstallStatePayload>(&gh, "other", NOW).is_err());
    assert!(signed::verify_at::<OidcStatePayload>(&oidc, SECRET, NOW).is_ok());
    assert!(signed::verify_at::<GithubInstallStatePayload>(&gh, SECRET, NOW).is_ok());
}

#[test]
fn test_verify_uses_wall_clock() {
    let token = token::issue_session("user-1", SECRET, 600).unwrap();
    assert_eq!(token::verify_session(&token, SECRET).unwrap().sub, "user-1");

    let stale = signed::issue_at(SessionPayload::new("user-1"), SECRET, 600, NOW).unwrap();
    assert!(token::verify_session(&stale, SECRET).is_err());

    let otk = token::issue_one_time_key("key-1", "ck_secret", "user-1", SECRET, 60_000).unwrap();
    assert_eq!(token::verify_one_time_key(&otk, SECRET).unwrap().api_key, "ck_secret");

    let expired = encrypted::issue(
        token::OneTimeKeyPayload::new("key-1", "ck_secret", "user-1"),
        SECRET,
        encrypted::now_ms() - 1,
    )
    .unwrap();
    assert!(token::verify_one_time_key(&expired, SECRET).is_err());
}

#[test]
fn test_garbage_never_panics() {
    for input in ["", ".", "..", "...", "cs1..", "cs1.%%.%%", "otk1...", "otk1.a.b.c", "🔑.🔑.🔑"] {
        assert!(token::verify_any(input, SECRET).is_err());
        assert!(signed::verify::<SessionPayload>(input, SECRET).is_err());
        assert!(encrypted::verify(input, SECRET).is_err());
    }
}

proptest! {
    #[test]
    fn signed_roundtrip(sub in "[a-zA-Z0-9_-]{1,40}", ttl in 0i64..100_000, secret in "[ -~]{1,64}") {
        prop_assume!(!secret.trim().is_empty());
        let token = signed::issue_at(SessionPayload::new(sub.clone()), &secret, ttl, NOW).unwrap();
        let payload: SessionPayload = signed::verify_at(&token, &secret, NOW).unwrap();
        prop_assert_eq!(payload.sub, sub);
        prop_assert_eq!(payload.exp - payload.iat, ttl.max(60));
    }

    #[test]
    fn signed_wrong_secret(a in "[a-z]{8,16}", b in "[a-z]{8,16}") {
        prop_assume!(a != b);
        let token = signed::issue_at(SessionPayload::new("user"), &a, 600, NOW).unwrap();
        prop_assert!(signed::verify_at::<SessionPayload>(&token, &b, NOW).is_err());
    }

    #[test]
    fn encrypted_wrong_secret(a in "[a-z]{8,16}", b in "[a-z]{8,16}") {
        prop_assume!(a != b);
        let payload = token::OneTimeKeyPayload::new("id", "ck_value", "user");
        let token = encrypted::issue(payload, &a, i64::MAX).unwrap();
        prop_assert!(encrypted::verify(&token, &b).is_err());
        prop_assert!(encrypted::verify(&token, &a).is_ok());
    }

    #[test]
    fn webhook_accepts_only_own_signature(body in proptest::collection::vec(any::<u8>(), 0..512), other in "[0-9a-f]{64}") {
        let header = webhook::sign(SECRET, &body);
        prop_assert!(webhook::verify_signature(SECRET, &body, &header));
        let forged = format!("sha256={other}");
        prop_assert_eq!(webhook::verify_signature(SECRET, &body, &forged), forged == header);
    }
}
