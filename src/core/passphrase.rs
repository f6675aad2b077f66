//! Passphrase sources.
//!
//! A passphrase comes from `--pass`, from `--pass-file`, or from an
//! interactive prompt with echo disabled.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::config::Context;
use crate::error::{InputError, Result};

/// Passphrase flags shared by `bundle`, `unbundle` and `run`.
#[derive(Args, Debug, Clone, Default)]
pub struct PassphraseOptions {
    /// Passphrase (visible in process listings; prefer --pass-file)
    #[arg(short, long)]
    pub pass: Option<String>,

    /// Read the passphrase from a file
    #[arg(long, value_name = "FILE")]
    pub pass_file: Option<PathBuf>,

    /// Use passphrase mode and prompt for the passphrase
    #[arg(long)]
    pub pass_mode: bool,
}

impl PassphraseOptions {
    /// Whether any passphrase flag was given.
    pub fn requested(&self) -> bool {
        self.pass.as_deref().is_some_and(|p| !p.is_empty())
            || self
                .pass_file
                .as_ref()
                .is_some_and(|f| !f.as_os_str().is_empty())
            || self.pass_mode
    }

    /// Obtain the passphrase. `confirm` asks twice when prompting.
    pub fn read(&self, ctx: &Context, confirm: bool) -> Result<Zeroizing<String>> {
        let passphrase = if let Some(pass) = self.pass.as_deref().filter(|p| !p.is_empty()) {
            debug!("passphrase from flag");
            Zeroizing::new(pass.to_string())
        } else if let Some(file) = self
            .pass_file
            .as_ref()
            .filter(|f| !f.as_os_str().is_empty())
        {
            let path = ctx.resolve(file);
            debug!(path = %path.display(), "passphrase from file");
            let contents = Zeroizing::new(
                std::fs::read_to_string(&path)
                    .map_err(|source| InputError::ReadFailed { path, source })?,
            );
            Zeroizing::new(strip_line_ending(&contents).to_string())
        } else {
            prompt(confirm)?
        };

        if passphrase.is_empty() {
            return Err(InputError::EmptyPassphrase.into());
        }
        Ok(passphrase)
    }
}

/// Drop a single trailing LF. A CR before it stays part of the passphrase.
fn strip_line_ending(s: &str) -> &str {
    s.strip_suffix('\n').unwrap_or(s)
}

fn prompt(confirm: bool) -> Result<Zeroizing<String>> {
    if !atty::is(atty::Stream::Stdin) {
        return Err(InputError::PassphraseUnavailable(
            "stdin is not a terminal; use --pass or --pass-file".to_string(),
        )
        .into());
    }

    let mut password = dialoguer::Password::new().with_prompt("Enter passphrase");
    if confirm {
        password = password.with_confirmation("Confirm passphrase", "passphrases do not match");
    }

    let passphrase = password
        .interact()
        .map_err(|e| InputError::PassphraseUnavailable(e.to_string()))?;
    Ok(Zeroizing::new(passphrase))
}
