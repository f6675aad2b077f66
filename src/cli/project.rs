//! Project command - create a cloud project.

use crate::cli::{output, resolve};
use crate::core::config::{Context, ProjectConfig};
use crate::error::Result;

/// Create a cloud project and link the working directory to it.
pub fn create(ctx: &Context, name: &str) -> Result<()> {
    let client = resolve::cloud_client(ctx)?;
    let project = client.create_project(name)?;

    let mut config = ProjectConfig::load_or_create(ctx)?;
    config.project_id = project.id.clone();
    config.mode = "cloud".to_string();
    config.save(ctx)?;

    output::success(&format!("created project {}", output::path(&project.name)));
    output::kv("id:", &project.id);
    Ok(())
}
