//! envsnap - encrypt .env files into portable bundles.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envsnap::cli::output;
use envsnap::cli::{execute, Cli};
use envsnap::core::config::Context;
use envsnap::error::{CipherError, Error, NetworkError, StoreError};

fn main() {
    let cli = Cli::parse();
    output::init();

    let filter = EnvFilter::try_from_env("ENVSNAP_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envsnap=debug")
        } else {
            EnvFilter::new("envsnap=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let result = Context::from_env(&cli.api_url).and_then(|ctx| execute(cli.command, &ctx));

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let suggestion = match &e {
                Error::Cipher(CipherError::DecryptionFailed) => {
                    Some("check the passphrase, or that this bundle belongs to this project")
                }
                Error::Store(StoreError::Corrupted(_)) => {
                    Some("inspect or restore ~/.envsnap/keys.json")
                }
                Error::Network(NetworkError::Request { .. }) => {
                    Some("check --api-url or ENVSNAP_API_URL")
                }
                _ => None,
            };

            output::error(&e.to_string());
            if let Some(hint) = suggestion {
                output::hint(hint);
            }
            std::process::exit(1);
        }
    }
}
