//! Plan building: derive local paths for every listed address up front and
//! flag the entries that must not be synced (malformed addresses, path
//! collisions) before any clone or pull runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use orgsync_core::paths::derive_local_path;
use orgsync_core::types::{RepoRef, RepoUrl};

use crate::error::SyncError;

/// One planned sync unit, in listing order.
#[derive(Debug)]
pub enum PlanEntry {
    /// Safe to sync.
    Ready(RepoRef),
    /// Must not be synced; recorded as a failed outcome with `error` as the
    /// diagnostic.
    Skipped { url: RepoUrl, error: SyncError },
}

/// Derive paths for all addresses and mark collisions.
///
/// Both members of a colliding pair are skipped — first-come-wins would
/// silently overwrite whichever repository lost the race. Non-colliding
/// entries are unaffected.
pub fn build_plan(root: &Path, urls: &[RepoUrl]) -> Vec<PlanEntry> {
    let derived: Vec<Result<PathBuf, _>> =
        urls.iter().map(|u| derive_local_path(root, u)).collect();

    // Index of the first address claiming each path, and how many claim it.
    let mut claims: HashMap<&PathBuf, (usize, usize)> = HashMap::new();
    for (i, path) in derived.iter().enumerate() {
        if let Ok(path) = path {
            let entry = claims.entry(path).or_insert((i, 0));
            entry.1 += 1;
        }
    }

    urls.iter()
        .zip(derived.iter())
        .enumerate()
        .map(|(i, (url, path))| match path {
            Err(e) => PlanEntry::Skipped {
                url: url.clone(),
                error: SyncError::InvalidUrl(e.clone()),
            },
            Ok(path) => {
                let (first_idx, count) = claims[path];
                if count > 1 {
                    let rival_idx = if i == first_idx {
                        // Point the first claimant at its earliest rival.
                        derived
                            .iter()
                            .enumerate()
                            .position(|(j, p)| j != i && p.as_ref() == Ok(path))
                            .unwrap_or(i)
                    } else {
                        first_idx
                    };
                    PlanEntry::Skipped {
                        url: url.clone(),
                        error: SyncError::PathCollision {
                            path: path.clone(),
                            first: urls[i.min(rival_idx)].clone(),
                            second: urls[i.max(rival_idx)].clone(),
                        },
                    }
                } else {
                    PlanEntry::Ready(RepoRef {
                        url: url.clone(),
                        local_path: path.clone(),
                    })
                }
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(raw: &[&str]) -> Vec<RepoUrl> {
        raw.iter().map(|u| RepoUrl::from(*u)).collect()
    }

    #[test]
    fn distinct_addresses_are_all_ready() {
        let plan = build_plan(
            Path::new("/mirror"),
            &urls(&["https://host/org/a.git", "https://host/org/b.git"]),
        );
        assert_eq!(plan.len(), 2);
        match &plan[0] {
            PlanEntry::Ready(r) => {
                assert_eq!(r.local_path, PathBuf::from("/mirror/a"));
            }
            other => panic!("expected Ready, got {other:?}"),
        }
        assert!(matches!(&plan[1], PlanEntry::Ready(_)));
    }

    #[test]
    fn colliding_pair_is_skipped_on_both_sides() {
        let plan = build_plan(
            Path::new("/mirror"),
            &urls(&[
                "https://host/org/dup.git",
                "https://host/org/solo.git",
                "https://other-host/fork/dup.git",
            ]),
        );
        assert!(matches!(
            &plan[0],
            PlanEntry::Skipped {
                error: SyncError::PathCollision { .. },
                ..
            }
        ));
        assert!(matches!(&plan[1], PlanEntry::Ready(_)));
        assert!(matches!(
            &plan[2],
            PlanEntry::Skipped {
                error: SyncError::PathCollision { .. },
                ..
            }
        ));
    }

    #[test]
    fn collision_diagnostic_names_both_addresses() {
        let plan = build_plan(
            Path::new("/mirror"),
            &urls(&["https://a/x/dup.git", "https://b/y/dup.git"]),
        );
        for entry in &plan {
            let PlanEntry::Skipped { error, .. } = entry else {
                panic!("expected Skipped, got {entry:?}");
            };
            let message = error.to_string();
            assert!(message.contains("https://a/x/dup.git"), "{message}");
            assert!(message.contains("https://b/y/dup.git"), "{message}");
        }
    }

    #[test]
    fn malformed_address_is_skipped_without_affecting_others() {
        let plan = build_plan(
            Path::new("/mirror"),
            &urls(&["https://host/org/.git", "https://host/org/ok.git"]),
        );
        assert!(matches!(
            &plan[0],
            PlanEntry::Skipped {
                error: SyncError::InvalidUrl(_),
                ..
            }
        ));
        assert!(matches!(&plan[1], PlanEntry::Ready(_)));
    }
}
