//! Orgsync core library — domain types, configuration, path derivation.
//!
//! Public API surface:
//! - [`types`] — newtypes and the [`RepoRef`] sync unit
//! - [`config`] — load / merge / validate process configuration
//! - [`paths`] — pure remote-address → local-path derivation
//! - [`error`] — [`ConfigError`] and [`InvalidRepoUrl`]

pub mod config;
pub mod error;
pub mod paths;
pub mod types;

pub use config::{Backoff, Config};
pub use error::{ConfigError, InvalidRepoUrl};
pub use types::{OrgName, RepoRef, RepoUrl};
