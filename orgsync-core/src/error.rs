//! Error types for orgsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while resolving configuration.
///
/// Every variant is fatal: configuration problems are reported before any
/// sync work starts and abort the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly requested `--config-path` file does not exist.
    #[error("config file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// `dirs::home_dir()` returned `None` — cannot locate defaults.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// No organization name from CLI args, environment, or config file.
    #[error("no organization name given; pass it as an argument or set ORGSYNC_ORG")]
    MissingOrg,

    /// No access token from CLI args, environment, or config file.
    #[error("no access token given; pass it as an argument or set ORGSYNC_TOKEN")]
    MissingToken,

    /// An environment value failed to parse (retry count, interval, backoff).
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// A repository address from which no local directory name can be derived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot derive a directory name from repository url '{url}'")]
pub struct InvalidRepoUrl {
    pub url: String,
}
