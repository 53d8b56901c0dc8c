//! Version-control primitives: clone and pull via the `git` binary.
//!
//! The orchestrator talks to [`GitClient`]; [`GitCli`] is the production
//! implementation and tests substitute recording fakes. Partial-clone
//! atomicity is `git`'s own concern — a failed clone leaves cleanup to it.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

use orgsync_core::types::RepoUrl;

/// How much captured stderr to keep in error messages.
const STDERR_LIMIT: usize = 500;

/// All errors that can arise from invoking git.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` binary could not be started at all.
    #[error("failed to run git: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    /// git ran and exited non-zero.
    #[error("git {op} failed ({status}): {stderr}")]
    Command {
        op: &'static str,
        status: String,
        stderr: String,
    },
}

impl GitError {
    /// A non-zero exit usually means a transient remote/network problem and
    /// is worth retrying. A spawn failure (git not installed, not executable)
    /// will never get better on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GitError::Command { .. })
    }
}

/// The clone/pull seam consumed by the orchestrator.
pub trait GitClient {
    /// Create a new local copy of `url` at `dest`.
    fn clone_repo(&self, url: &RepoUrl, dest: &Path) -> Result<(), GitError>;

    /// Update the existing copy at `path` from `remote`/`branch`.
    fn pull_repo(&self, path: &Path, remote: &str, branch: &str) -> Result<(), GitError>;
}

/// [`GitClient`] backed by the system `git` binary.
pub struct GitCli;

impl GitCli {
    fn run(op: &'static str, args: &[&str]) -> Result<(), GitError> {
        let output = Command::new("git")
            .args(args)
            .output()
            .map_err(|e| GitError::Spawn { source: e })?;
        if output.status.success() {
            return Ok(());
        }
        let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        if stderr.len() > STDERR_LIMIT {
            stderr.truncate(STDERR_LIMIT);
            stderr.push('…');
        }
        Err(GitError::Command {
            op,
            status: output.status.to_string(),
            stderr,
        })
    }
}

impl GitClient for GitCli {
    fn clone_repo(&self, url: &RepoUrl, dest: &Path) -> Result<(), GitError> {
        let dest = dest.to_string_lossy();
        Self::run("clone", &["clone", &url.0, &dest])
    }

    fn pull_repo(&self, path: &Path, remote: &str, branch: &str) -> Result<(), GitError> {
        let path = path.to_string_lossy();
        Self::run("pull", &["-C", &path, "pull", remote, branch])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
