//! Pull command - fetch and decrypt a cloud bundle.

use crate::cli::{output, resolve, PullArgs};
use crate::core::cloud;
use crate::core::config::{Context, ProjectConfig};
use crate::core::guard;
use crate::error::Result;

/// Pull a version (latest by default) into `args.out`.
pub fn execute(ctx: &Context, args: PullArgs) -> Result<()> {
    let config = ProjectConfig::load_or_create(ctx)?;
    let client = resolve::cloud_client(ctx)?;
    let project_id = resolve::cloud_project(args.project, &config)?;

    let out = ctx.resolve(&args.out);
    guard::ensure_writable(&out, args.force)?;

    let pulled = cloud::pull(&client, &project_id, args.version)?;
    guard::write_plaintext(&out, &pulled.plaintext, args.force)?;

    output::success(&format!(
        "pulled version {} to {}",
        pulled.version,
        output::path(out.display())
    ));
    Ok(())
}
