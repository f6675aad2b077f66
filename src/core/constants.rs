//! Constants used throughout envsnap.
//!
//! Centralizes file names, wire strings and defaults.

/// Per-user configuration directory relative to HOME (~/.envsnap).
pub const CONFIG_DIR: &str = ".envsnap";

/// Key cache file inside the configuration directory.
pub const KEYS_FILE: &str = "keys.json";

/// Bearer token file inside the configuration directory.
pub const TOKEN_FILE: &str = "token";

/// Per-directory project configuration file.
pub const PROJECT_FILE: &str = ".envsnap.json";

/// Default bundle path for new projects.
pub const DEFAULT_BUNDLE_PATH: &str = "secrets.envsnap";

/// Default plaintext output for `unbundle` and `pull`.
pub const ENV_FILE: &str = ".env";

/// Project id placeholder until a cloud project is created.
pub const LOCAL_PROJECT_ID: &str = "local";

/// Algorithm tag stored with every cached project key.
pub const KEY_ALGORITHM: &str = "age-symmetric-v1";

/// Length in bytes of project keys and cloud data keys.
pub const KEY_LEN: usize = 32;

/// Length in bytes of the random key id.
pub const KEY_ID_LEN: usize = 16;

/// Control-plane used when neither `--api-url` nor `ENVSNAP_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Gitignore entries to keep key material out of version control.
pub const GITIGNORE_ENTRIES: &[&str] = &[".envsnap.key", "secrets.envsnap.key", ".envsnap/"];
