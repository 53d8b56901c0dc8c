//! # orgsync-github
//!
//! Repository-listing adapter for the GitHub REST API.
//!
//! [`GithubLister`] implements the [`RepoLister`] seam: given an organization
//! name it returns the clone addresses of every repository the token can see,
//! paginating `GET /orgs/{org}/repos` until a short page. It is a pure query
//! with no retry of its own; transient failures surface as typed
//! [`ListError`]s for the orchestrator's uniform retry policy.

pub mod error;

use std::time::Duration;

use serde::Deserialize;

use orgsync_core::types::{OrgName, RepoUrl};

pub use error::ListError;

/// Page size requested from the API; a shorter page ends pagination.
const PER_PAGE: usize = 100;

/// Sent on every request; GitHub rejects requests without a user agent.
const USER_AGENT: &str = concat!("orgsync/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Trait seam
// ---------------------------------------------------------------------------

/// Lists the repository addresses belonging to an organization.
///
/// Output order is whatever the hosting API returns — stable within a run,
/// not guaranteed across calls.
pub trait RepoLister {
    fn list_repos(&self, org: &OrgName) -> Result<Vec<RepoUrl>, ListError>;
}

// ---------------------------------------------------------------------------
// GitHub implementation
// ---------------------------------------------------------------------------

/// One repository object from `GET /orgs/{org}/repos`; everything else in
/// the payload is ignored.
#[derive(Debug, Deserialize)]
struct RepoRecord {
    clone_url: String,
}

/// [`RepoLister`] backed by the GitHub REST API v3.
pub struct GithubLister {
    agent: ureq::Agent,
    token: String,
    api_base: String,
}

impl GithubLister {
    pub fn new(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();
        Self {
            agent,
            token: token.into(),
            api_base: api_base.into().trim_end_matches('/').to_owned(),
        }
    }

    fn fetch_page(&self, org: &OrgName, page: usize) -> Result<Vec<RepoRecord>, ListError> {
        let url = format!("{}/orgs/{}/repos", self.api_base, org);
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
            .query("per_page", &PER_PAGE.to_string())
            .query("page", &page.to_string())
            .call()
            .map_err(|e| classify_call_error(e, org))?;

        response.into_json().map_err(|e| ListError::Decode {
            message: e.to_string(),
        })
    }
}

impl RepoLister for GithubLister {
    fn list_repos(&self, org: &OrgName) -> Result<Vec<RepoUrl>, ListError> {
        let mut urls = Vec::new();
        for page in 1.. {
            tracing::debug!("listing '{org}' repositories, page {page}");
            let batch = self.fetch_page(org, page)?;
            let short_page = batch.len() < PER_PAGE;
            urls.extend(batch.into_iter().map(|r| RepoUrl(r.clone_url)));
            if short_page {
                break;
            }
        }
        tracing::info!("'{org}' has {} repositories", urls.len());
        Ok(urls)
    }
}

fn classify_call_error(err: ureq::Error, org: &OrgName) -> ListError {
    match err {
        ureq::Error::Status(status, response) => {
            let rate_exhausted = response
                .header("x-ratelimit-remaining")
                .map(|v| v.trim() == "0")
                .unwrap_or(false);
            classify_status(status, org, rate_exhausted)
        }
        ureq::Error::Transport(t) => ListError::Network {
            message: t.to_string(),
        },
    }
}

/// Map an HTTP status to a typed error. `rate_exhausted` reflects the
/// `x-ratelimit-remaining` header, which disambiguates 403.
fn classify_status(status: u16, org: &OrgName, rate_exhausted: bool) -> ListError {
    match status {
        401 => ListError::Auth { status },
        403 if rate_exhausted => ListError::RateLimited,
        403 => ListError::Auth { status },
        404 => ListError::OrgNotFound { org: org.0.clone() },
        429 => ListError::RateLimited,
        other => ListError::Api { status: other },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_records_decode_from_api_payload() {
        let body = r#"[
            {"id": 1, "name": "a", "clone_url": "https://github.com/acme/a.git", "private": false},
            {"id": 2, "name": "b", "clone_url": "https://github.com/acme/b.git", "fork": true}
        ]"#;
        let records: Vec<RepoRecord> = serde_json::from_str(body).unwrap();
        let urls: Vec<RepoUrl> = records.into_iter().map(|r| RepoUrl(r.clone_url)).collect();
        assert_eq!(
            urls,
            vec![
                RepoUrl::from("https://github.com/acme/a.git"),
                RepoUrl::from("https://github.com/acme/b.git"),
            ]
        );
    }

    #[test]
    fn status_classification() {
        let org = OrgName::from("acme");
        assert!(matches!(
            classify_status(401, &org, false),
            ListError::Auth { status: 401 }
        ));
        assert!(matches!(
            classify_status(403, &org, false),
            ListError::Auth { status: 403 }
        ));
        assert!(matches!(
            classify_status(403, &org, true),
            ListError::RateLimited
        ));
        assert!(matches!(
            classify_status(429, &org, false),
            ListError::RateLimited
        ));
        assert!(matches!(
            classify_status(404, &org, false),
            ListError::OrgNotFound { .. }
        ));
        assert!(matches!(
            classify_status(503, &org, false),
            ListError::Api { status: 503 }
        ));
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let lister = GithubLister::new("t", "https://api.github.com/");
        assert_eq!(lister.api_base, "https://api.github.com");
    }
}
