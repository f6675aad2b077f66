//! Test support utilities for envsnap integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir and home dir. Child processes get
/// `.current_dir()` and `HOME`, so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with `envsnap init` already run.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to initialize project: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create an initialized environment with a `.env` file in place.
    pub fn with_env(contents: &str) -> Self {
        let t = Self::init();
        t.write(".env", contents);
        t
    }

    /// Path inside the project directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file in the project directory.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) {
        fs::write(self.path(name), contents).expect("failed to write file");
    }

    /// Read a file from the project directory.
    pub fn read(&self, name: &str) -> Vec<u8> {
        fs::read(self.path(name)).expect("failed to read file")
    }

    /// Per-user configuration directory (`~/.envsnap`).
    pub fn config_dir(&self) -> PathBuf {
        self.home.path().join(".envsnap")
    }

    /// Store a raw bearer token as `login` would.
    pub fn write_token(&self, token: &str) {
        fs::create_dir_all(self.config_dir()).expect("failed to create config dir");
        fs::write(self.config_dir().join("token"), token).expect("failed to write token");
    }

    /// Point the project at a cloud project id, keeping its name.
    pub fn link_cloud_project(&self, project_id: &str) {
        let path = self.path(".envsnap.json");
        let mut config: serde_json::Value = match fs::read(&path) {
            Ok(data) => serde_json::from_slice(&data).expect("config should be JSON"),
            Err(_) => serde_json::json!({
                "project_name": "cloud-app",
                "bundle_path": "secrets.envsnap",
            }),
        };
        config["project_id"] = serde_json::json!(project_id);
        config["mode"] = serde_json::json!("cloud");
        self.write(".envsnap.json", serde_json::to_vec_pretty(&config).unwrap());
    }
}
