//! Configuration management.
//!
//! Holds the per-invocation [`Context`] (where things live) and the
//! per-directory [`ProjectConfig`] stored in `.envsnap.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::core::{constants, guard};
use crate::error::{ConfigError, Result};

/// Explicit configuration context passed to every constructor.
///
/// Built once per invocation; tests build their own with temp directories.
#[derive(Debug, Clone)]
pub struct Context {
    /// Per-user directory holding the key cache and token (`~/.envsnap`).
    pub config_dir: PathBuf,
    /// Directory the command operates in (holds `.envsnap.json`).
    pub work_dir: PathBuf,
    /// Control-plane base URL.
    pub api_url: Url,
}

impl Context {
    /// Build a context from the environment: HOME and the current directory.
    pub fn from_env(api_url: &str) -> Result<Self> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let work_dir = std::env::current_dir()?;
        Self::new(home.join(constants::CONFIG_DIR), work_dir, api_url)
    }

    /// Build a context from explicit locations.
    pub fn new(config_dir: PathBuf, work_dir: PathBuf, api_url: &str) -> Result<Self> {
        let api_url = parse_api_url(api_url)?;
        Ok(Self {
            config_dir,
            work_dir,
            api_url,
        })
    }

    /// Path to the key cache document.
    pub fn keys_path(&self) -> PathBuf {
        self.config_dir.join(constants::KEYS_FILE)
    }

    /// Path to the bearer token file.
    pub fn token_path(&self) -> PathBuf {
        self.config_dir.join(constants::TOKEN_FILE)
    }

    /// Path to the project configuration in the working directory.
    pub fn project_path(&self) -> PathBuf {
        self.work_dir.join(constants::PROJECT_FILE)
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidApiUrl {
            url: raw.to_string(),
            reason: "not a base URL".to_string(),
        }
        .into());
    }
    // Keep a trailing slash so joins append instead of replacing the last segment.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Project configuration stored in `.envsnap.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project_name: String,
    pub project_id: String,
    /// "local" or "cloud". Anything else is treated as local.
    #[serde(default)]
    pub mode: String,
    pub bundle_path: String,
}

impl ProjectConfig {
    /// Default configuration for a fresh directory.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            project_id: constants::LOCAL_PROJECT_ID.to_string(),
            mode: "local".to_string(),
            bundle_path: constants::DEFAULT_BUNDLE_PATH.to_string(),
        }
    }

    /// Load the project configuration, creating and saving a default one
    /// on first use.
    pub fn load_or_create(ctx: &Context) -> Result<Self> {
        let path = ctx.project_path();
        if !path.exists() {
            let name = ctx
                .work_dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "default".to_string());
            debug!(path = %path.display(), project = %name, "creating project config");
            let config = Self::new(name);
            config.save(ctx)?;
            return Ok(config);
        }

        debug!(path = %path.display(), "loading project config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let config =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?;
        Ok(config)
    }

    /// Save to `.envsnap.json` with owner-only permissions.
    pub fn save(&self, ctx: &Context) -> Result<()> {
        let data = serde_json::to_vec_pretty(self).map_err(ConfigError::Serialize)?;
        guard::write_private_atomic(&ctx.project_path(), &data)
    }

    /// Whether the config asks for cloud mode at all.
    pub fn is_cloud(&self) -> bool {
        self.mode == "cloud"
    }

    /// Whether a real cloud project id has been assigned.
    pub fn has_cloud_project(&self) -> bool {
        !self.project_id.is_empty() && self.project_id != constants::LOCAL_PROJECT_ID
    }
}

/// Ensure `.gitignore` in the working directory lists key material paths.
///
/// Appends only the missing entries.
pub fn ensure_gitignore(ctx: &Context) -> Result<()> {
    let gitignore = ctx.work_dir.join(".gitignore");

    let existing = if gitignore.exists() {
        std::fs::read_to_string(&gitignore)?
    } else {
        String::new()
    };

    let mut updated = existing.clone();
    for entry in constants::GITIGNORE_ENTRIES {
        if !existing.lines().any(|l| l.trim() == *entry) {
            if !updated.is_empty() && !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(entry);
            updated.push('\n');
        }
    }

    if updated != existing {
        std::fs::write(gitignore, updated)?;
    }

    Ok(())
}
