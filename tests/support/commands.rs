//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Proxy variables that would reroute loopback requests in CI.
const PROXY_VARS: &[&str] = &[
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

impl Test {
    /// Create an envsnap command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - The control-plane pointed at a closed local port
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envsnap").expect("failed to find envsnap binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env("ENVSNAP_API_URL", super::UNREACHABLE_API);
        cmd.env_remove("ENVSNAP_LOG");
        for var in PROXY_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run envsnap with arbitrary arguments.
    pub fn envsnap(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run envsnap")
    }

    /// Shortcut for `envsnap init`.
    pub fn init_cmd(&self) -> Output {
        self.envsnap(&["init"])
    }

    /// Shortcut for `envsnap bundle <file> [args...]`.
    pub fn bundle(&self, file: &str, args: &[&str]) -> Output {
        let mut full = vec!["bundle", file];
        full.extend_from_slice(args);
        self.envsnap(&full)
    }

    /// Shortcut for `envsnap unbundle <file> [args...]`.
    pub fn unbundle(&self, file: &str, args: &[&str]) -> Output {
        let mut full = vec!["unbundle", file];
        full.extend_from_slice(args);
        self.envsnap(&full)
    }

    /// Shortcut for `envsnap run <file> [args...] -- <command...>`.
    pub fn run(&self, file: &str, args: &[&str], command: &[&str]) -> Output {
        let mut full = vec!["run", file];
        full.extend_from_slice(args);
        full.push("--");
        full.extend_from_slice(command);
        self.envsnap(&full)
    }

    /// Shortcut for `envsnap key export [args...]`.
    pub fn key_export(&self, args: &[&str]) -> Output {
        let mut full = vec!["key", "export"];
        full.extend_from_slice(args);
        self.envsnap(&full)
    }
}
