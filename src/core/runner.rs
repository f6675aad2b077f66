//! Run executor.
//!
//! Spawns a child with decrypted variables merged into the inherited
//! environment. Nothing is written to disk.

use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::core::env;
use crate::error::{InputError, Result};

/// Run `command` with the variables parsed from `plaintext`.
///
/// Returns the child's exit code. A child killed by a signal yields
/// `128 + signal` on Unix.
///
/// # Errors
///
/// `InputError::NoCommand` for an empty command and
/// `InputError::CommandNotFound` when the program cannot be resolved.
pub fn run(plaintext: &[u8], command: &[String]) -> Result<i32> {
    let (program, args) = command.split_first().ok_or(InputError::NoCommand)?;
    if program.is_empty() {
        return Err(InputError::NoCommand.into());
    }

    let resolved =
        which::which(program).map_err(|_| InputError::CommandNotFound(program.clone()))?;

    let vars = env::parse(plaintext);
    debug!(
        program = %resolved.display(),
        args = args.len(),
        vars = vars.len(),
        "spawning child"
    );

    let status = Command::new(&resolved)
        .args(args)
        .envs(vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .status()?;

    let code = exit_code(status);
    debug!(code, "child exited");
    Ok(code)
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
