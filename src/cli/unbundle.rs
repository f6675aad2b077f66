//! Unbundle command - decrypt a bundle to a .env file.

use crate::cli::{output, resolve, UnbundleArgs};
use crate::core::config::Context;
use crate::core::guard;
use crate::error::Result;

/// Decrypt `args.file` into `args.out` with owner-only permissions.
pub fn execute(ctx: &Context, args: UnbundleArgs) -> Result<()> {
    let out = ctx.resolve(&args.out);
    // Refuse before prompting or touching the network.
    guard::ensure_writable(&out, args.force)?;

    let plaintext = resolve::open_bundle(ctx, &args.file, &args.pass, args.version)?;
    guard::write_plaintext(&out, &plaintext, args.force)?;

    output::success(&format!(
        "decrypted {} to {}",
        args.file.display(),
        output::path(out.display())
    ));
    Ok(())
}
