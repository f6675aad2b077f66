//! Tests for cloud commands that fail before or at the network boundary.

use crate::support::*;

#[test]
fn test_pull_without_login() {
    let t = Test::init();
    t.link_cloud_project("proj-123");

    let output = t.envsnap(&["pull"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "not logged in");
    assert!(!t.path(".env").exists());
}

#[test]
fn test_push_without_login_writes_nothing() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.bundle(".env", &["--push", "--project", "proj-123", "--out", "copy.envsnap"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "not logged in");
    assert!(!t.path("copy.envsnap").exists());
    assert!(!t.path("secrets.envsnap").exists());
}

#[test]
fn test_corrupted_token() {
    let t = Test::with_env(SAMPLE_ENV);
    t.link_cloud_project("proj-123");

    for bad in ["", "   \n", "two\nlines"] {
        t.write_token(bad);
        let output = t.envsnap(&["pull", "--out", "pulled.env"]);
        assert_failure(&output);
        assert_stderr_contains(&output, "corrupted");
    }
}

#[test]
fn test_push_requires_real_project() {
    let t = Test::with_env(SAMPLE_ENV);
    t.write_token("tok-123");

    let output = t.bundle(".env", &["--push"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no project specified");
}

#[test]
fn test_push_network_failure_writes_nothing() {
    let t = Test::with_env(SAMPLE_ENV);
    t.write_token("tok-123");

    let output = t.bundle(".env", &["--push", "--project", "proj-123", "--out", "copy.envsnap"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "push failed");
    assert!(!t.path("copy.envsnap").exists());
}

#[test]
fn test_cloud_project_never_falls_back_to_local_key() {
    let t = Test::with_env(SAMPLE_ENV);
    assert_success(&t.bundle(".env", &[]));
    t.link_cloud_project("proj-123");

    let output = t.unbundle("secrets.envsnap", &["--out", "out.env"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "not logged in");
    assert!(!t.path("out.env").exists());
}

#[test]
fn test_cloud_commands_need_login() {
    let t = Test::init();
    t.link_cloud_project("proj-123");

    for args in [
        &["share", "--user", "a@b.c"][..],
        &["audit"][..],
        &["project", "create", "app"][..],
    ] {
        let output = t.envsnap(args);
        assert_failure(&output);
        assert_stderr_contains(&output, "not logged in");
    }
}

#[test]
fn test_login_requires_license() {
    let t = Test::new();

    let output = t.envsnap(&["login", "--license", "  "]);
    assert_failure(&output);
    assert_stderr_contains(&output, "license key must not be empty");
    assert!(!t.config_dir().join("token").exists());
}

#[test]
fn test_login_network_failure_keeps_local_mode() {
    let t = Test::init();

    let output = t.envsnap(&["login", "--license", "LIC-123"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "login failed");
    assert!(!t.config_dir().join("token").exists());

    let config: serde_json::Value = serde_json::from_slice(&t.read(".envsnap.json")).unwrap();
    assert_eq!(config["mode"], "local");
}

#[test]
fn test_pull_refuses_to_overwrite() {
    let t = Test::init();
    t.link_cloud_project("proj-123");
    t.write_token("tok-123");
    t.write(".env", "KEEP=me\n");

    let output = t.envsnap(&["pull"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "refusing to overwrite");
    assert_eq!(t.read(".env"), b"KEEP=me\n");
}
