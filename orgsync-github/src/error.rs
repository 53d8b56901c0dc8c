//! Error types for orgsync-github.

use thiserror::Error;

/// All errors that can arise from listing an organization's repositories.
///
/// The lister performs no retry of its own; callers apply the uniform retry
/// policy, consulting [`ListError::is_retryable`].
#[derive(Debug, Error)]
pub enum ListError {
    /// 401/403 — the token is missing scopes, expired, or invalid.
    #[error("authorization rejected by the hosting API (HTTP {status})")]
    Auth { status: u16 },

    /// 404 — no such organization (or the token cannot see it).
    #[error("organization '{org}' not found")]
    OrgNotFound { org: String },

    /// 429, or 403 with the rate-limit budget exhausted.
    #[error("hosting API rate limit exhausted")]
    RateLimited,

    /// Any other non-success HTTP status.
    #[error("hosting API returned HTTP {status}")]
    Api { status: u16 },

    /// DNS, TLS, connect, or read failure before a status was received.
    #[error("network error: {message}")]
    Network { message: String },

    /// The response body was not the expected JSON shape.
    #[error("malformed API response: {message}")]
    Decode { message: String },
}

impl ListError {
    /// Transient failures worth another attempt: transport problems, rate
    /// limiting, and server-side (5xx) statuses. Auth, missing org, and
    /// malformed responses fail fast.
    pub fn is_retryable(&self) -> bool {
        match self {
            ListError::Network { .. } | ListError::RateLimited => true,
            ListError::Api { status } => *status >= 500,
            ListError::Auth { .. } | ListError::OrgNotFound { .. } | ListError::Decode { .. } => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_server_errors_are_retryable() {
        assert!(ListError::Network {
            message: "timed out".into()
        }
        .is_retryable());
        assert!(ListError::RateLimited.is_retryable());
        assert!(ListError::Api { status: 502 }.is_retryable());
    }

    #[test]
    fn auth_and_client_errors_fail_fast() {
        assert!(!ListError::Auth { status: 401 }.is_retryable());
        assert!(!ListError::OrgNotFound { org: "acme".into() }.is_retryable());
        assert!(!ListError::Api { status: 422 }.is_retryable());
        assert!(!ListError::Decode {
            message: "not json".into()
        }
        .is_retryable());
    }
}
