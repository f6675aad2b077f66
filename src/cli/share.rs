//! Share command.

use crate::cli::{output, resolve, Role};
use crate::core::config::{Context, ProjectConfig};
use crate::error::Result;

pub fn execute(ctx: &Context, user: &str, role: Role, project: Option<String>) -> Result<()> {
    let config = ProjectConfig::load_or_create(ctx)?;
    let client = resolve::cloud_client(ctx)?;
    let project_id = resolve::cloud_project(project, &config)?;

    client.share(&project_id, user, role.as_str())?;
    output::success(&format!(
        "shared project {} with {} ({})",
        project_id,
        user,
        role.as_str()
    ));
    Ok(())
}
