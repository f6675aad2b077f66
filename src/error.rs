//! Error types.
//!
//! Every failure is fatal to the single invocation. Variants are grouped by
//! the layer that raises them so `main` can attach a hint.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bad arguments or unusable input files.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("input file '{0}' does not exist")]
    MissingFile(PathBuf),

    #[error("input file '{0}' is empty")]
    EmptyFile(PathBuf),

    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no project specified: use --project or run `envsnap project create <name>`")]
    MissingProject,

    #[error("passphrase must not be empty")]
    EmptyPassphrase,

    #[error("cannot read passphrase: {0}")]
    PassphraseUnavailable(String),

    #[error("no command specified")]
    NoCommand,

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("license key must not be empty")]
    EmptyLicense,
}

/// Project configuration (`.envsnap.json`) and context errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Key cache and token storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(
        "no local project key found for '{0}'. Fix:\n  \
         • on a teammate's machine: `envsnap key export --project {0}`\n  \
         • or use a passphrase: `--pass`\n  \
         • or use the cloud: `envsnap login` then `envsnap pull`"
    )]
    KeyNotFound(String),

    #[error("invalid project key: {0}")]
    InvalidKey(String),

    #[error(
        "exporting keys from cloud projects is disabled by default.\n  \
         Use --i-accept-risk if you understand the implications."
    )]
    ExportRefused,

    #[error("failed to read key cache: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write key cache: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("key cache is corrupted: {0}")]
    Corrupted(#[source] serde_json::Error),

    #[error("random number generator failed: {0}")]
    Random(String),
}

/// Envelope encryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Wrong key, tampering and truncation are deliberately indistinguishable.
    #[error("decryption failed: wrong key or corrupted bundle")]
    DecryptionFailed,

    #[error("key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("failed to decode key: {0}")]
    InvalidKeyEncoding(String),
}

/// Bearer token problems. Never degrades to another mode.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("not logged in: run `envsnap login --license <KEY>` first")]
    NotLoggedIn,

    #[error("stored token is corrupted: run `envsnap login --license <KEY>` again")]
    CorruptedToken,

    #[error("control-plane rejected the token (HTTP {0}): run `envsnap login --license <KEY>` again")]
    Rejected(u16),
}

/// Transport and protocol errors talking to the control-plane or blob store.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("{step} failed: {message}")]
    Request { step: &'static str, message: String },

    #[error("{step} failed with status {status}: {body}")]
    Status {
        step: &'static str,
        status: u16,
        body: String,
    },

    #[error("{step} returned an invalid response: {message}")]
    InvalidResponse { step: &'static str, message: String },

    #[error("requested version {requested} but the control-plane returned version {returned}")]
    VersionMismatch { requested: u64, returned: u64 },
}

/// Output file discipline.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("refusing to overwrite {0}: use --force")]
    Exists(PathBuf),

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for envsnap operations.
pub type Result<T> = std::result::Result<T, Error>;
