use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

const SESSION_SECRET: &str = "cli-session-secret";
const WEBHOOK_SECRET: &str = "It's a Secret to Everybody";

/// A command isolated from any credkit.toml or CREDKIT_* variables on the host
fn credkit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("credkit").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("CREDKIT_SESSION_SECRET", SESSION_SECRET)
        .env("CREDKIT_OIDC_STATE_SECRET", "cli-oidc-secret")
        .env("CREDKIT_GITHUB_STATE_SECRET", "cli-github-secret")
        .env("CREDKIT_GITHUB_WEBHOOK_SECRET", WEBHOOK_SECRET)
        .env("CREDKIT_API_KEY_HASH_SECRET", "cli-pepper")
        .env("CREDKIT_ONE_TIME_KEY_SECRET", "cli-otk-secret");
    cmd
}

fn issue(dir: &TempDir, args: &[&str]) -> String {
    let output = credkit(dir).arg("issue").args(args).output().unwrap();
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

#[test]
fn test_session_issue_and_verify() {
    let dir = TempDir::new().unwrap();
    let token = issue(&dir, &["session", "--sub", "user-42"]);
    assert!(token.starts_with("cs1."));

    credkit(&dir)
        .args(["verify", &token])
        .assert()
        .success()
        .stdout(predicate::str::contains("user-42"));
}

#[test]
fn test_verify_json_output() {
    let dir = TempDir::new().unwrap();
    let token = issue(&dir, &["session", "--sub", "user-42", "--ttl", "120"]);

    let output = credkit(&dir)
        .args(["--format", "json", "verify", &token])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["kind"], "session");
    assert_eq!(doc["payload"]["sub"], "user-42");
    let exp = doc["payload"]["exp"].as_i64().unwrap();
    let iat = doc["payload"]["iat"].as_i64().unwrap();
    assert_eq!(exp - iat, 120);
}

#[test]
fn test_verify_with_wrong_secret_exits_rejected() {
    let dir = TempDir::new().unwrap();
    let token = issue(&dir, &["session", "--sub", "user-42"]);

    credkit(&dir)
        .env("CREDKIT_SESSION_SECRET", "a-different-secret")
        .args(["verify", &token])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("rejected"));
}

#[test]
fn test_missing_secret_is_config_error() {
    let dir = TempDir::new().unwrap();
    credkit(&dir)
        .env_remove("CREDKIT_SESSION_SECRET")
        .args(["issue", "session", "--sub", "user-42"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("CREDKIT_SESSION_SECRET"));
}

#[test]
fn test_secret_from_config_file() {
    let dir = TempDir::new().unwrap();
    let mut file = std::fs::File::create(dir.path().join("credkit.toml")).unwrap();
    writeln!(file, "[secrets]\nsession = \"file-secret\"").unwrap();

    let output = credkit(&dir)
        .env_remove("CREDKIT_SESSION_SECRET")
        .args(["issue", "session", "--sub", "user-1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let token = String::from_utf8(output.stdout).unwrap().trim().to_string();

    credkit(&dir)
        .env_remove("CREDKIT_SESSION_SECRET")
        .args(["verify", &token])
        .assert()
        .success();
    credkit(&dir).args(["verify", &token]).assert().code(1);
}

#[test]
fn test_state_tokens() {
    let dir = TempDir::new().unwrap();
    let oidc = issue(
        &dir,
        &[
            "oidc-state",
            "--workspace",
            "acme",
            "--provider",
            "okta",
            "--code-verifier",
            "verifier",
            "--nonce",
            "n-1",
            "--redirect-uri",
            "https://app.example/callback",
        ],
    );
    assert!(oidc.starts_with("oidc1."));
    credkit(&dir)
        .args(["verify", &oidc])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://app.example/callback"));

    let gh = issue(
        &dir,
        &["github-state", "--workspace", "acme", "--actor", "user-7", "--nonce", "n-2"],
    );
    assert!(gh.starts_with("ghs1."));
    credkit(&dir)
        .args(["verify", &gh])
        .assert()
        .success()
        .stdout(predicate::str::contains("user-7"));
}

#[test]
fn test_one_time_key_roundtrip() {
    let dir = TempDir::new().unwrap();
    let token = issue(
        &dir,
        &[
            "one-time-key",
            "--api-key-id",
            "key-1",
            "--api-key",
            "ck_plaintext",
            "--user-id",
            "user-1",
        ],
    );
    assert!(token.starts_with("otk1."));
    assert!(!token.contains("ck_plaintext"));

    credkit(&dir)
        .args(["verify", &token])
        .assert()
        .success()
        .stdout(predicate::str::contains("ck_plaintext"));
}

#[test]
fn test_inspect_signed_and_refuse_encrypted() {
    let dir = TempDir::new().unwrap();
    let token = issue(&dir, &["session", "--sub", "user-42"]);
    credkit(&dir)
        .env_remove("CREDKIT_SESSION_SECRET")
        .args(["inspect", &token])
        .assert()
        .success()
        .stdout(predicate::str::contains("user-42"))
        .stderr(predicate::str::contains("WITHOUT"));

    credkit(&dir)
        .args(["inspect", "otk1.a.b.c"])
        .assert()
        .code(2);
}

#[test]
fn test_webhook_sign_and_verify() {
    let dir = TempDir::new().unwrap();
    let body_path = dir.path().join("body.json");
    std::fs::write(&body_path, "Hello, World!").unwrap();
    let body = body_path.to_str().unwrap();

    credkit(&dir)
        .args(["webhook", "sign", "--body", body])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17",
        ));

    credkit(&dir)
        .args([
            "webhook",
            "verify",
            "--body",
            body,
            "--signature",
            "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17",
        ])
        .assert()
        .success();

    credkit(&dir)
        .args(["webhook", "verify", "--body", body, "--signature", "sha256=00"])
        .assert()
        .code(1);
}

#[test]
fn test_webhook_verify_from_stdin() {
    let dir = TempDir::new().unwrap();
    credkit(&dir)
        .args([
            "webhook",
            "verify",
            "--signature",
            "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17",
        ])
        .write_stdin("Hello, World!")
        .assert()
        .success();
}

#[test]
fn test_webhook_installation() {
    let dir = TempDir::new().unwrap();
    credkit(&dir)
        .args(["webhook", "installation"])
        .write_stdin(r#"{"installation":{"id":"456"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::diff("456\n"));

    credkit(&dir)
        .args(["webhook", "installation"])
        .write_stdin(r#"{"installation":{"id":"x"}}"#)
        .assert()
        .code(2);
}

#[test]
fn test_api_key_generate_and_check() {
    let dir = TempDir::new().unwrap();
    let output = credkit(&dir)
        .args(["--format", "json", "api-key", "generate"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let key = doc["api_key"].as_str().unwrap();
    let hash = doc["hash"].as_str().unwrap();
    assert!(key.starts_with("ck_"));

    credkit(&dir)
        .args(["api-key", "check", key, "--stored", hash])
        .assert()
        .success()
        .stderr(predicate::str::contains("keyed"));

    credkit(&dir)
        .args(["api-key", "check", "ck_wrong", "--stored", hash])
        .assert()
        .code(1);
}

#[test]
fn test_api_key_mask_and_invite() {
    let dir = TempDir::new().unwrap();
    credkit(&dir)
        .args(["api-key", "mask", "ck_abcdefghijklmnop"])
        .assert()
        .success()
        .stdout(predicate::str::diff("ck_abc...mnop\n"));

    credkit(&dir)
        .arg("invite")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("inv_"));
}
