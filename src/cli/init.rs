//! Init command - create the local project key.

use tracing::info;

use crate::cli::output;
use crate::core::config::{self, Context, ProjectConfig};
use crate::core::store::{InitOutcome, KeyStore};
use crate::error::Result;

/// Initialize the project in the working directory. Safe to run twice.
pub fn execute(ctx: &Context) -> Result<()> {
    let project = ProjectConfig::load_or_create(ctx)?;
    let store = KeyStore::open(ctx);

    let outcome = store.init(&project.project_name)?;
    config::ensure_gitignore(ctx)?;

    let key = outcome.key();
    match &outcome {
        InitOutcome::Created(_) => {
            info!(project = %project.project_name, "project initialized");
            output::success(&format!(
                "initialized project {}",
                output::path(&project.project_name)
            ));
        }
        InitOutcome::AlreadyInitialized(_) => {
            output::success(&format!(
                "project {} already initialized",
                output::path(&project.project_name)
            ));
        }
    }
    output::kv("key id:     ", &key.key_id);
    output::kv("fingerprint:", key.fingerprint()?);
    output::kv("key cache:  ", store.path().display());
    output::dimmed(&format!(
        "next: {}",
        output::cmd("envsnap bundle .env")
    ));

    Ok(())
}
