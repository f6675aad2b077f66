//! Tests for argument validation and error reporting.

use crate::support::*;

#[test]
fn test_version_must_be_positive() {
    let t = Test::init();

    let output = t.envsnap(&["pull", "--version", "0"]);
    assert_failure(&output);

    let output = t.envsnap(&["unbundle", "x.envsnap", "--version", "abc"]);
    assert_failure(&output);
}

#[test]
fn test_invalid_api_url() {
    let t = Test::init();

    let output = t.envsnap(&["--api-url", "not a url", "init"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid API URL");
}

#[test]
fn test_errors_go_to_stderr() {
    let t = Test::init();

    let output = t.bundle("missing.env", &[]);
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert_stderr_contains(&output, "missing.env");
}

#[test]
fn test_corrupted_key_cache() {
    let t = Test::with_env(SAMPLE_ENV);
    std::fs::write(t.config_dir().join("keys.json"), "{ not json").unwrap();

    let output = t.bundle(".env", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "key cache is corrupted");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.envsnap(&["--verbose", "bundle", ".env"]);
    assert_success(&output);
    assert_stderr_contains(&output, "resolved encryption mode");
    assert!(!stdout(&output).contains("DEBUG"));
}
