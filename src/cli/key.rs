//! Key command - export the cached project key.

use crate::cli::output;
use crate::core::config::{Context, ProjectConfig};
use crate::core::store::KeyStore;
use crate::error::Result;

/// Print the project key on stdout; the warning goes to stderr.
pub fn export(ctx: &Context, project: Option<String>, accept_risk: bool) -> Result<()> {
    let config = ProjectConfig::load_or_create(ctx)?;
    let project = project
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| config.project_name.clone());

    let key = KeyStore::open(ctx).export(&project, config.is_cloud(), accept_risk)?;

    output::warn(&format!(
        "this key decrypts every local bundle of '{}'; share it only over a secure channel",
        project
    ));
    output::warn(&format!("key id: {} ({})", key.key_id, key.fingerprint()?));
    print!("{}", key.key_b64);
    Ok(())
}
