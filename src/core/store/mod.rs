//! Local key storage.
//!
//! One 32-byte key per project name, cached in a single per-user JSON
//! document (`~/.envsnap/keys.json`). The bearer token lives next to it in
//! its own file, see [`TokenStore`].
//!
//! Writes replace the whole document through a temp file and a rename.
//! There is no lock around the read-modify-write cycle, so two concurrent
//! invocations updating the cache can lose one update.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::cipher::{self, RawKey};
use crate::core::config::Context;
use crate::core::constants::{KEY_ALGORITHM, KEY_ID_LEN};
use crate::core::guard;
use crate::error::{Result, StoreError};

mod token;

pub use token::{Token, TokenStore};

/// A cached project key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectKey {
    pub key_id: String,
    #[serde(rename = "alg")]
    pub algorithm: String,
    pub key_b64: String,
    pub created_at: DateTime<Utc>,
}

impl ProjectKey {
    /// Decode the key bytes.
    pub fn raw_key(&self) -> Result<RawKey> {
        cipher::key_from_base64(&self.key_b64)
            .map_err(|e| StoreError::InvalidKey(e.to_string()).into())
    }

    /// Short fingerprint for display.
    pub fn fingerprint(&self) -> Result<String> {
        Ok(cipher::fingerprint(&*self.raw_key()?))
    }
}

/// The on-disk key cache document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct KeyCache {
    #[serde(default)]
    projects: BTreeMap<String, ProjectKey>,
}

/// Result of [`KeyStore::init`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new key was generated and saved.
    Created(ProjectKey),
    /// The project already had a key; nothing changed.
    AlreadyInitialized(ProjectKey),
}

impl InitOutcome {
    /// The project key, new or existing.
    pub fn key(&self) -> &ProjectKey {
        match self {
            InitOutcome::Created(k) | InitOutcome::AlreadyInitialized(k) => k,
        }
    }
}

/// Filesystem-backed key cache.
pub struct KeyStore {
    dir: PathBuf,
    path: PathBuf,
}

impl KeyStore {
    /// Key store for the given context.
    pub fn open(ctx: &Context) -> Self {
        Self {
            dir: ctx.config_dir.clone(),
            path: ctx.keys_path(),
        }
    }

    /// Path of the cache document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a key for `project` unless one already exists.
    pub fn init(&self, project: &str) -> Result<InitOutcome> {
        let mut cache = self.load()?;
        if let Some(existing) = cache.projects.get(project) {
            debug!(project, key_id = %existing.key_id, "project already initialized");
            return Ok(InitOutcome::AlreadyInitialized(existing.clone()));
        }

        let key = cipher::generate_key()?;
        let project_key = ProjectKey {
            key_id: cipher::random_b64(KEY_ID_LEN)?,
            algorithm: KEY_ALGORITHM.to_string(),
            key_b64: cipher::key_to_base64(&key).to_string(),
            created_at: Utc::now(),
        };

        cache
            .projects
            .insert(project.to_string(), project_key.clone());
        self.save(&cache)?;

        debug!(project, key_id = %project_key.key_id, "project key created");
        Ok(InitOutcome::Created(project_key))
    }

    /// Look up the key for `project`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::KeyNotFound` if the project has no cached key.
    pub fn get(&self, project: &str) -> Result<ProjectKey> {
        self.load()?
            .projects
            .remove(project)
            .ok_or_else(|| StoreError::KeyNotFound(project.to_string()).into())
    }

    /// Fetch a key for printing.
    ///
    /// Keys of cloud-mode projects are only released when the caller
    /// explicitly accepts the risk.
    pub fn export(&self, project: &str, cloud: bool, accept_risk: bool) -> Result<ProjectKey> {
        if cloud && !accept_risk {
            return Err(StoreError::ExportRefused.into());
        }
        let key = self.get(project)?;
        warn!(project, key_id = %key.key_id, "exporting project key");
        Ok(key)
    }

    fn load(&self) -> Result<KeyCache> {
        if !self.path.exists() {
            return Ok(KeyCache::default());
        }

        #[cfg(unix)]
        check_permissions(&self.path);

        let data = fs::read(&self.path).map_err(StoreError::ReadFailed)?;
        let cache: KeyCache = serde_json::from_slice(&data).map_err(StoreError::Corrupted)?;
        debug!(projects = cache.projects.len(), "key cache loaded");
        Ok(cache)
    }

    fn save(&self, cache: &KeyCache) -> Result<()> {
        ensure_private_dir(&self.dir)?;
        let data = serde_json::to_vec_pretty(cache).map_err(StoreError::Corrupted)?;
        guard::write_private_atomic(&self.path, &data)
    }
}

/// Create the configuration directory with mode 0700.
pub(crate) fn ensure_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(StoreError::WriteFailed)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
            .map_err(StoreError::WriteFailed)?;
    }

    Ok(())
}

#[cfg(unix)]
fn check_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(meta) = fs::metadata(path) {
        let mode = meta.permissions().mode() & 0o777;
        if mode != 0o600 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "insecure key cache permissions"
            );
        }
    }
}
