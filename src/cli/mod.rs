//! Command-line interface.

pub mod audit;
pub mod bundle;
pub mod init;
pub mod key;
pub mod login;
pub mod output;
pub mod project;
pub mod pull;
pub mod resolve;
pub mod run;
pub mod share;
pub mod unbundle;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::config::Context;
use crate::core::constants::DEFAULT_API_URL;
use crate::core::passphrase::PassphraseOptions;
use crate::error::Result;

/// envsnap - encrypt .env files into portable bundles.
#[derive(Parser)]
#[command(
    name = "envsnap",
    about = "Encrypt .env files into portable bundles with local, passphrase, or cloud keys",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control-plane base URL
    #[arg(
        long,
        global = true,
        env = "ENVSNAP_API_URL",
        default_value = DEFAULT_API_URL,
        value_name = "URL"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create the local project key and project config
    Init,

    /// Encrypt a .env file into a bundle
    Bundle(BundleArgs),

    /// Decrypt a bundle back to a .env file
    Unbundle(UnbundleArgs),

    /// Run a command with variables from a bundle
    Run(RunArgs),

    /// Pull and decrypt a bundle version from the cloud
    Pull(PullArgs),

    /// Manage the local project key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Log in with a license key
    Login {
        /// License key
        #[arg(long)]
        license: String,
    },

    /// Manage cloud projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Share a cloud project with another user
    Share {
        /// Email of the user to share with
        #[arg(long)]
        user: String,
        /// Access level
        #[arg(long, value_enum, default_value_t = Role::Read)]
        role: Role,
        /// Cloud project id (defaults to the configured project)
        #[arg(long)]
        project: Option<String>,
    },

    /// Show the audit log of a cloud project
    Audit {
        /// Cloud project id (defaults to the configured project)
        #[arg(long)]
        project: Option<String>,
        /// Maximum number of entries
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
}

#[derive(Args, Debug)]
pub struct BundleArgs {
    /// Path to the .env file
    pub file: PathBuf,
    /// Output path (defaults to the configured bundle path)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    #[command(flatten)]
    pub pass: PassphraseOptions,
    /// Push the bundle to the cloud
    #[arg(long)]
    pub push: bool,
    /// Cloud project id (defaults to the configured project)
    #[arg(long)]
    pub project: Option<String>,
    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct UnbundleArgs {
    /// Path to the bundle
    pub file: PathBuf,
    /// Output path
    #[arg(short, long, default_value = crate::core::constants::ENV_FILE)]
    pub out: PathBuf,
    #[command(flatten)]
    pub pass: PassphraseOptions,
    /// Cloud version whose key opens the bundle (latest by default)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub version: Option<u64>,
    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the bundle
    pub file: PathBuf,
    #[command(flatten)]
    pub pass: PassphraseOptions,
    /// Cloud version whose key opens the bundle (latest by default)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub version: Option<u64>,
    /// Command and arguments to run, after `--`
    #[arg(last = true)]
    pub command: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PullArgs {
    /// Output path
    #[arg(short, long, default_value = crate::core::constants::ENV_FILE)]
    pub out: PathBuf,
    /// Cloud project id (defaults to the configured project)
    #[arg(long)]
    pub project: Option<String>,
    /// Version to pull (latest by default)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub version: Option<u64>,
    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,
}

/// Key subcommands.
#[derive(Subcommand)]
pub enum KeyAction {
    /// Print the project key for a teammate
    Export {
        /// Project name (defaults to the configured project)
        #[arg(long)]
        project: Option<String>,
        /// Allow exporting keys of cloud projects
        #[arg(long)]
        i_accept_risk: bool,
    },
}

/// Project subcommands.
#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a cloud project and link this directory to it
    Create {
        /// Project name
        name: String,
    },
}

/// Access level granted by `share`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Read,
    Write,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Read => "read",
            Role::Write => "write",
        }
    }
}

/// Execute a command, returning the process exit code.
pub fn execute(command: Command, ctx: &Context) -> Result<i32> {
    use Command::*;

    match command {
        Init => init::execute(ctx)?,
        Bundle(args) => bundle::execute(ctx, args)?,
        Unbundle(args) => unbundle::execute(ctx, args)?,
        Run(args) => return run::execute(ctx, args),
        Pull(args) => pull::execute(ctx, args)?,
        Key { action } => match action {
            KeyAction::Export {
                project,
                i_accept_risk,
            } => key::export(ctx, project, i_accept_risk)?,
        },
        Login { license } => login::execute(ctx, &license)?,
        Project { action } => match action {
            ProjectAction::Create { name } => project::create(ctx, &name)?,
        },
        Share {
            user,
            role,
            project,
        } => share::execute(ctx, &user, role, project)?,
        Audit { project, limit } => audit::execute(ctx, project, limit)?,
    }

    Ok(0)
}
