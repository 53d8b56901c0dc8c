//! Error types for orgsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use orgsync_core::error::InvalidRepoUrl;
use orgsync_core::types::RepoUrl;
use orgsync_github::ListError;

/// All errors that can arise from sync orchestration.
///
/// Only listing failures propagate out of a run; git failures and plan
/// problems are recorded per repository as `Failed` outcomes.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Repository listing failed after retries — fatal, nothing to process.
    #[error("listing failed: {0}")]
    List(#[from] ListError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A repository address yields no usable directory name.
    #[error("invalid repository address: {0}")]
    InvalidUrl(#[from] InvalidRepoUrl),

    /// Two distinct addresses derive the same local path — a configuration
    /// error, never silently overwritten.
    #[error("local path {path} is derived from both '{first}' and '{second}'")]
    PathCollision {
        path: PathBuf,
        first: RepoUrl,
        second: RepoUrl,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
