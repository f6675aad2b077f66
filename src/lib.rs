//! envsnap - encrypt .env files into portable bundles.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Create the local project key
//! │   ├── bundle        # Encrypt a .env file
//! │   ├── unbundle      # Decrypt a bundle to a .env file
//! │   ├── run           # Run with injected variables
//! │   ├── pull          # Fetch a cloud version
//! │   ├── key           # Key export
//! │   ├── login         # Cloud login
//! │   ├── project       # Cloud project creation
//! │   ├── share / audit # Cloud pass-throughs
//! │   └── resolve       # Shared input and key resolution
//! └── core/             # Core library components
//!     ├── mode          # Local / Passphrase / Cloud decision
//!     ├── cipher/       # Envelope encryption
//!     │   ├── mod       # Cipher trait, KeyMaterial, key helpers
//!     │   └── age       # age scrypt implementation
//!     ├── store/        # Key cache and bearer token
//!     ├── cloud/        # Push/pull protocol and HTTP client
//!     ├── guard         # Overwrite and permission discipline
//!     ├── env           # .env parsing
//!     ├── runner        # Child process execution
//!     ├── passphrase    # Passphrase sources
//!     └── config        # Context and .envsnap.json
//! ```
//!
//! # Modes
//!
//! - **Local**: a random per-project key cached in `~/.envsnap/keys.json`
//! - **Passphrase**: a key derived from a passphrase with scrypt
//! - **Cloud**: a fresh data key per bundle, held by the control-plane

pub mod cli;
pub mod core;
pub mod error;
