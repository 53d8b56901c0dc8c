//! # orgsync-sync
//!
//! Sync orchestration: clone-vs-pull decision, retry policy, per-repository
//! failure isolation.
//!
//! Call [`sync_org`] with a [`RepoLister`](orgsync_github::RepoLister) and a
//! [`GitClient`] to mirror an organization's repositories under the
//! configured local root.

pub mod error;
pub mod git;
pub mod orchestrator;
pub mod plan;
pub mod retry;

pub use error::SyncError;
pub use git::{GitCli, GitClient, GitError};
pub use orchestrator::{sync_org, SyncOutcome, SyncReport};
pub use retry::{RetryFailure, RetryPolicy};
