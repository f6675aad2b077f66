//! Tests for `envsnap bundle` and `envsnap unbundle`.

use crate::support::*;

#[test]
fn test_local_mode_roundtrip() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.bundle(".env", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "local mode");

    let bundle = t.read("secrets.envsnap");
    assert!(bundle.starts_with(b"age-encryption.org/v1"));
    assert!(!String::from_utf8_lossy(&bundle).contains("FOO=bar"));

    let output = t.unbundle("secrets.envsnap", &["--out", "restored.env"]);
    assert_success(&output);
    assert_eq!(t.read("restored.env"), SAMPLE_ENV.as_bytes());
    assert_private(&t.path("restored.env"));
}

#[test]
fn test_passphrase_roundtrip_exact_bytes() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    assert_success(&t.bundle(".env", &["--pass", "p1", "--out", "p.envsnap"]));

    let output = t.unbundle("p.envsnap", &["--pass", "p1", "--out", "out.env"]);
    assert_success(&output);
    assert_eq!(t.read("out.env"), b"FOO=bar\nNUM=42");
    assert_private(&t.path("out.env"));
}

#[test]
fn test_wrong_passphrase_fails_without_output() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);
    assert_success(&t.bundle(".env", &["--pass", "p1", "--out", "p.envsnap"]));

    let output = t.unbundle("p.envsnap", &["--pass", "wrong", "--out", "out.env"]);
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "decryption failed");
    assert!(!t.path("out.env").exists());
}

#[test]
fn test_pass_file() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);
    t.write("pass.txt", "from-file\n");

    assert_success(&t.bundle(".env", &["--pass-file", "pass.txt", "--out", "f.envsnap"]));
    assert_success(&t.unbundle(
        "f.envsnap",
        &["--pass", "from-file", "--out", "out.env"],
    ));
    assert_eq!(t.read("out.env"), SAMPLE_ENV.as_bytes());
}

#[test]
fn test_pass_mode_without_terminal_fails() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t.bundle(".env", &["--pass-mode"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "not a terminal");
    assert!(!t.path("secrets.envsnap").exists());
}

#[test]
fn test_local_key_does_not_open_passphrase_bundle() {
    let t = Test::with_env(SAMPLE_ENV);
    assert_success(&t.bundle(".env", &["--pass", "p1", "--out", "p.envsnap"]));

    let output = t.unbundle("p.envsnap", &["--out", "out.env"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption failed");
    assert!(!t.path("out.env").exists());
}

#[test]
fn test_local_mode_without_key_lists_remedies() {
    let t = Test::new();
    t.write(".env", SAMPLE_ENV);

    let output = t.bundle(".env", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no local project key found");
    assert_stderr_contains(&output, "key export --project");
    assert_stderr_contains(&output, "--pass");
    assert_stderr_contains(&output, "envsnap pull");
}

#[test]
fn test_unbundle_refuses_to_overwrite() {
    let t = Test::with_env(SAMPLE_ENV);
    assert_success(&t.bundle(".env", &[]));
    t.write("existing.env", "KEEP=me\n");

    let output = t.unbundle("secrets.envsnap", &["--out", "existing.env"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "refusing to overwrite");
    assert_eq!(t.read("existing.env"), b"KEEP=me\n");

    let output = t.unbundle("secrets.envsnap", &["--out", "existing.env", "--force"]);
    assert_success(&output);
    assert_eq!(t.read("existing.env"), SAMPLE_ENV.as_bytes());
    assert_private(&t.path("existing.env"));
}

#[test]
fn test_unbundle_defaults_to_dot_env() {
    let t = Test::with_env(SAMPLE_ENV);
    assert_success(&t.bundle(".env", &[]));

    // .env already exists, so the default output is refused.
    let output = t.unbundle("secrets.envsnap", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, ".env");

    std::fs::remove_file(t.path(".env")).unwrap();
    assert_success(&t.unbundle("secrets.envsnap", &[]));
    assert_eq!(t.read(".env"), SAMPLE_ENV.as_bytes());
}

#[test]
fn test_bundle_refuses_to_overwrite() {
    let t = Test::with_env(SAMPLE_ENV);
    t.write("secrets.envsnap", "old");

    let output = t.bundle(".env", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "refusing to overwrite");
    assert_eq!(t.read("secrets.envsnap"), b"old");

    assert_success(&t.bundle(".env", &["--force"]));
    assert_ne!(t.read("secrets.envsnap"), b"old");
}

#[test]
fn test_missing_and_empty_inputs() {
    let t = Test::init();

    let output = t.bundle("nope.env", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "does not exist");

    t.write("empty.env", "");
    let output = t.bundle("empty.env", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "is empty");

    let output = t.unbundle("missing.envsnap", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "does not exist");
}

#[test]
fn test_tampered_bundle_fails() {
    let t = Test::with_env(SAMPLE_ENV);
    assert_success(&t.bundle(".env", &[]));

    let mut bundle = t.read("secrets.envsnap");
    let last = bundle.len() - 1;
    bundle[last] ^= 0x01;
    t.write("secrets.envsnap", bundle);

    let output = t.unbundle("secrets.envsnap", &["--out", "out.env"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption failed");
    assert!(!t.path("out.env").exists());
}
