//! Encryption mode resolution.
//!
//! Decides which key material encrypts or decrypts a bundle. This is the
//! only place that decision is made.

use std::fmt;

use crate::core::config::ProjectConfig;
use crate::core::passphrase::PassphraseOptions;

/// The encryption strategy for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Cached per-project key from the local key store.
    Local,
    /// Key derived from a user-supplied passphrase.
    Passphrase,
    /// Per-bundle data key managed by the control-plane.
    Cloud,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Local => "local",
            Mode::Passphrase => "passphrase",
            Mode::Cloud => "cloud",
        })
    }
}

/// Resolve the mode for an invocation. Rules, first match wins:
///
/// 1. `push` → Cloud.
/// 2. Cloud config with a real project id → Cloud.
/// 3. Any passphrase flag → Passphrase.
/// 4. Otherwise → Local.
///
/// A cloud config without a usable project id falls through silently.
pub fn resolve(config: Option<&ProjectConfig>, pass: &PassphraseOptions, push: bool) -> Mode {
    if push {
        return Mode::Cloud;
    }
    if config.is_some_and(|c| c.is_cloud() && c.has_cloud_project()) {
        return Mode::Cloud;
    }
    if pass.requested() {
        return Mode::Passphrase;
    }
    Mode::Local
}
