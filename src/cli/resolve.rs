//! Shared resolution helpers for command handlers.
//!
//! Input loading, cloud sessions and per-mode key material.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::cipher::{self, KeyMaterial};
use crate::core::cloud::{self, HttpControlPlane};
use crate::core::config::{Context, ProjectConfig};
use crate::core::mode::{self, Mode};
use crate::core::passphrase::PassphraseOptions;
use crate::core::store::{KeyStore, TokenStore};
use crate::error::{InputError, Result};

/// Read an input file, rejecting missing and empty files.
pub fn read_input(ctx: &Context, file: &Path) -> Result<(PathBuf, Zeroizing<Vec<u8>>)> {
    let path = ctx.resolve(file);
    if !path.exists() {
        return Err(InputError::MissingFile(file.to_path_buf()).into());
    }

    let data = Zeroizing::new(std::fs::read(&path).map_err(|source| InputError::ReadFailed {
        path: path.clone(),
        source,
    })?);
    if data.is_empty() {
        return Err(InputError::EmptyFile(file.to_path_buf()).into());
    }

    debug!(path = %path.display(), size = data.len(), "input loaded");
    Ok((path, data))
}

/// Authenticated control-plane client. Fails if not logged in.
pub fn cloud_client(ctx: &Context) -> Result<HttpControlPlane> {
    let token = TokenStore::open(ctx).load()?;
    HttpControlPlane::from_context(ctx, Some(token))
}

/// Project id from the flag, falling back to the project config.
pub fn cloud_project(flag: Option<String>, config: &ProjectConfig) -> Result<String> {
    let project_id = flag
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| config.project_id.clone());
    cloud::require_project(&project_id)?;
    Ok(project_id)
}

/// The cached key of the configured project.
pub fn local_key(ctx: &Context, config: &ProjectConfig) -> Result<KeyMaterial> {
    let key = KeyStore::open(ctx).get(&config.project_name)?;
    debug!(project = %config.project_name, key_id = %key.key_id, "using local project key");
    Ok(KeyMaterial::from_raw_key(&*key.raw_key()?))
}

/// Decrypt a bundle file with whatever key material the resolved mode
/// calls for. Shared by `unbundle` and `run`.
pub fn open_bundle(
    ctx: &Context,
    file: &Path,
    pass: &PassphraseOptions,
    version: Option<u64>,
) -> Result<Zeroizing<Vec<u8>>> {
    let (_, ciphertext) = read_input(ctx, file)?;
    let config = ProjectConfig::load_or_create(ctx)?;
    let mode = mode::resolve(Some(&config), pass, false);
    debug!(%mode, "resolved decryption mode");

    if version.is_some() && mode != Mode::Cloud {
        warn!(%mode, "--version only applies to cloud projects; ignoring");
    }

    let key = match mode {
        Mode::Local => local_key(ctx, &config)?,
        Mode::Passphrase => KeyMaterial::from_passphrase(&pass.read(ctx, false)?),
        Mode::Cloud => {
            let client = cloud_client(ctx)?;
            let project_id = cloud_project(None, &config)?;
            let found = cloud::version_key(&client, &project_id, version)?;
            debug!(version = found.version, "using cloud data key");
            KeyMaterial::from_raw_key(&found.key)
        }
    };

    cipher::decrypt(&ciphertext, &key)
}
