//! Pure remote-address → local-path derivation.
//!
//! The mapping is a pure function: the same address always yields the same
//! path within a run. Collisions between distinct addresses are detected by
//! the sync planner, not here.

use std::path::{Path, PathBuf};

use crate::error::InvalidRepoUrl;
use crate::types::RepoUrl;

/// Directory name for a repository: the last `/`-delimited segment of the
/// address with a trailing `.git` suffix stripped.
///
/// Trailing slashes are ignored. An address that yields an empty or
/// path-traversing segment is malformed.
pub fn repo_dir_name(url: &RepoUrl) -> Result<String, InvalidRepoUrl> {
    let trimmed = url.0.trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or("");
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() || name == "." || name == ".." {
        return Err(InvalidRepoUrl { url: url.0.clone() });
    }
    Ok(name.to_owned())
}

/// `<root>/<repo_dir_name(url)>` — pure, no I/O.
pub fn derive_local_path(root: &Path, url: &RepoUrl) -> Result<PathBuf, InvalidRepoUrl> {
    Ok(root.join(repo_dir_name(url)?))
}
