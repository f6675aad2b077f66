//! Core library components.
//!
//! Mode resolution, key storage, the envelope cipher, the cloud protocol and
//! the run executor. Nothing here prints to the terminal; handlers in
//! [`crate::cli`] do.

pub mod cipher;
pub mod cloud;
pub mod config;
pub mod constants;
pub mod env;
pub mod guard;
pub mod mode;
pub mod passphrase;
pub mod runner;
pub mod store;
