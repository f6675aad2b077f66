//! Bundle command - encrypt a .env file.

use tracing::debug;

use crate::cli::{output, resolve, BundleArgs};
use crate::core::cipher::{self, KeyMaterial};
use crate::core::cloud;
use crate::core::config::{Context, ProjectConfig};
use crate::core::guard;
use crate::core::mode::{self, Mode};
use crate::error::Result;

/// Encrypt `args.file` with the resolved mode.
///
/// Local and passphrase modes write the bundle to `--out` (or the
/// configured bundle path). Cloud mode pushes a new version and writes a
/// local copy only when `--out` is given.
pub fn execute(ctx: &Context, args: BundleArgs) -> Result<()> {
    let (_, plaintext) = resolve::read_input(ctx, &args.file)?;
    let config = ProjectConfig::load_or_create(ctx)?;
    let mode = mode::resolve(Some(&config), &args.pass, args.push);
    debug!(%mode, "resolved encryption mode");

    let out = ctx.resolve(
        args.out
            .clone()
            .unwrap_or_else(|| config.bundle_path.clone().into()),
    );

    let key = match mode {
        Mode::Cloud => return push(ctx, &args, &config, &plaintext),
        Mode::Passphrase => {
            guard::ensure_writable(&out, args.force)?;
            KeyMaterial::from_passphrase(&args.pass.read(ctx, true)?)
        }
        Mode::Local => {
            guard::ensure_writable(&out, args.force)?;
            resolve::local_key(ctx, &config)?
        }
    };

    let ciphertext = cipher::encrypt(&plaintext, &key)?;
    guard::write_bundle(&out, &ciphertext, args.force)?;

    output::success(&format!(
        "encrypted {} to {} ({} mode)",
        args.file.display(),
        output::path(out.display()),
        mode
    ));
    Ok(())
}

fn push(ctx: &Context, args: &BundleArgs, config: &ProjectConfig, plaintext: &[u8]) -> Result<()> {
    let client = resolve::cloud_client(ctx)?;
    let project_id = resolve::cloud_project(args.project.clone(), config)?;

    let copy = args.out.as_ref().map(|p| ctx.resolve(p));
    if let Some(copy) = &copy {
        guard::ensure_writable(copy, args.force)?;
    }

    let receipt = cloud::push(&client, &project_id, plaintext)?;
    output::success(&format!("pushed version {}", receipt.version));
    output::kv("bundle: ", &receipt.bundle_id);
    output::kv("project:", &project_id);

    if let Some(copy) = copy {
        guard::write_bundle(&copy, &receipt.ciphertext, args.force)?;
        output::kv("copy:   ", copy.display());
    }
    Ok(())
}
