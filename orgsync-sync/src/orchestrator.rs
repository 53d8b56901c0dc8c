//! Sync orchestration: list once, then clone-or-pull every repository.
//!
//! Per repository the decision is a two-state machine — if the derived local
//! path exists on disk, pull; otherwise clone. Every fallible unit of work
//! (the listing call included) runs under the same [`RetryPolicy`]. A
//! repository that exhausts its retries is recorded as `Failed` and the loop
//! continues; only listing failure aborts the run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use orgsync_core::config::Config;
use orgsync_core::types::{OrgName, RepoRef, RepoUrl};
use orgsync_github::{ListError, RepoLister};

use crate::error::{io_err, SyncError};
use crate::git::{GitClient, GitError};
use crate::plan::{self, PlanEntry};
use crate::retry::RetryPolicy;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Per-repository result of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyncOutcome {
    /// A fresh local copy was created.
    Cloned { url: RepoUrl, path: PathBuf },
    /// The existing local copy was updated.
    Pulled { url: RepoUrl, path: PathBuf },
    /// All attempts failed (or the entry was never safe to sync).
    Failed {
        url: RepoUrl,
        /// Attempts actually made; 0 when skipped at plan time.
        attempts: u32,
        error: String,
    },
}

impl SyncOutcome {
    pub fn url(&self) -> &RepoUrl {
        match self {
            SyncOutcome::Cloned { url, .. }
            | SyncOutcome::Pulled { url, .. }
            | SyncOutcome::Failed { url, .. } => url,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SyncOutcome::Failed { .. })
    }
}

/// Summary of a whole run, in listing order.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub org: OrgName,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<SyncOutcome>,
}

impl SyncReport {
    pub fn cloned_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SyncOutcome::Cloned { .. }))
            .count()
    }

    pub fn pulled_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SyncOutcome::Pulled { .. }))
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &SyncOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(SyncOutcome::is_failure)
    }
}

// ---------------------------------------------------------------------------
// sync_org
// ---------------------------------------------------------------------------

/// Mirror every repository of `config.org` under `config.root`.
///
/// Listing is retried under the policy and fatal on exhaustion. Per-repository
/// failures are isolated: they become `Failed` outcomes in the report.
pub fn sync_org(
    config: &Config,
    lister: &dyn RepoLister,
    git: &dyn GitClient,
) -> Result<SyncReport, SyncError> {
    let policy = RetryPolicy::from_config(config);
    let started_at = Utc::now();

    let urls = policy
        .run(
            &format!("list '{}' repositories", config.org),
            || lister.list_repos(&config.org),
            ListError::is_retryable,
        )
        .map_err(|failure| SyncError::List(failure.error))?;

    let mut outcomes = Vec::with_capacity(urls.len());
    for entry in plan::build_plan(&config.root, &urls) {
        match entry {
            PlanEntry::Ready(repo) => {
                outcomes.push(sync_one(git, &policy, &repo, &config.remote, &config.branch));
            }
            PlanEntry::Skipped { url, error } => {
                tracing::error!("skipping '{url}': {error}");
                outcomes.push(SyncOutcome::Failed {
                    url,
                    attempts: 0,
                    error: error.to_string(),
                });
            }
        }
    }

    Ok(SyncReport {
        org: config.org.clone(),
        started_at,
        finished_at: Utc::now(),
        outcomes,
    })
}

/// The two-state decision for one repository.
///
/// The existence check is advisory, not transactional: a directory created
/// concurrently between check and clone is an accepted hazard.
fn sync_one(
    git: &dyn GitClient,
    policy: &RetryPolicy,
    repo: &RepoRef,
    remote: &str,
    branch: &str,
) -> SyncOutcome {
    if repo.local_path.exists() {
        tracing::info!("pulling {} in {}", repo.url, repo.local_path.display());
        match policy.run(
            &format!("pull {}", repo.url),
            || git.pull_repo(&repo.local_path, remote, branch),
            GitError::is_retryable,
        ) {
            Ok(()) => SyncOutcome::Pulled {
                url: repo.url.clone(),
                path: repo.local_path.clone(),
            },
            Err(failure) => SyncOutcome::Failed {
                url: repo.url.clone(),
                attempts: failure.attempts,
                error: failure.error.to_string(),
            },
        }
    } else {
        if let Some(parent) = repo.local_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return SyncOutcome::Failed {
                    url: repo.url.clone(),
                    attempts: 0,
                    error: io_err(parent, e).to_string(),
                };
            }
        }
        tracing::info!("cloning {} into {}", repo.url, repo.local_path.display());
        match policy.run(
            &format!("clone {}", repo.url),
            || git.clone_repo(&repo.url, &repo.local_path),
            GitError::is_retryable,
        ) {
            Ok(()) => SyncOutcome::Cloned {
                url: repo.url.clone(),
                path: repo.local_path.clone(),
            },
            Err(failure) => SyncOutcome::Failed {
                url: repo.url.clone(),
                attempts: failure.attempts,
                error: failure.error.to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
