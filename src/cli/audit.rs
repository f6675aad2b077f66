//! Audit command - print the cloud audit log.

use crate::cli::{output, resolve};
use crate::core::config::{Context, ProjectConfig};
use crate::error::Result;

/// Print audit entries in the order the control-plane returns them.
pub fn execute(ctx: &Context, project: Option<String>, limit: u32) -> Result<()> {
    let config = ProjectConfig::load_or_create(ctx)?;
    let client = resolve::cloud_client(ctx)?;
    let project_id = resolve::cloud_project(project, &config)?;

    let entries = client.audit(&project_id, limit)?;
    if entries.is_empty() {
        output::dimmed("no audit entries");
        return Ok(());
    }

    output::header(&format!("Audit log ({})", project_id));
    for entry in entries {
        let details = if entry.details.is_null() {
            String::new()
        } else {
            entry.details.to_string()
        };
        println!("  {}  {:<20} {}", entry.created_at, entry.action, details);
    }
    Ok(())
}
