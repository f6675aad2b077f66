//! Run command.
//!
//! Executes a command with decrypted variables injected into its
//! environment. No plaintext is written to disk.

use crate::cli::{resolve, RunArgs};
use crate::core::config::Context;
use crate::core::runner;
use crate::error::{InputError, Result};

/// Run `args.command` and return its exit code.
pub fn execute(ctx: &Context, args: RunArgs) -> Result<i32> {
    if args.command.is_empty() {
        return Err(InputError::NoCommand.into());
    }

    let plaintext = resolve::open_bundle(ctx, &args.file, &args.pass, args.version)?;
    runner::run(&plaintext, &args.command)
}
