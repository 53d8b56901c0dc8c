//! Composable retry policy, reused across listing, clone, and pull.
//!
//! The policy wraps any fallible unit of work: run it, and on failure either
//! sleep and try again (transient errors, budget remaining) or give up
//! (non-retryable error, or attempts exhausted). A unit of work that always
//! fails retryably is attempted exactly `max_retries + 1` times.

use std::fmt;
use std::time::Duration;

use orgsync_core::config::{Backoff, Config};

/// Exponential backoff never sleeps longer than this.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Terminal failure of a retried unit of work.
#[derive(Debug)]
pub struct RetryFailure<E> {
    /// Attempts actually made, including the final failing one.
    pub attempts: u32,
    /// The last error observed.
    pub error: E,
}

/// Max-attempts + sleep-interval pair, applied uniformly to every fallible
/// unit of work in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub interval: Duration,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, interval: Duration, backoff: Backoff) -> Self {
        Self {
            max_retries,
            interval,
            backoff,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_retries, config.retry_interval, config.backoff)
    }

    /// Run `op` until it succeeds or the policy gives up.
    ///
    /// `is_retryable` decides whether a given error is worth another attempt;
    /// non-retryable errors fail after a single attempt. `label` names the
    /// unit of work in log output.
    pub fn run<T, E, F, R>(&self, label: &str, mut op: F, is_retryable: R) -> Result<T, RetryFailure<E>>
    where
        E: fmt::Display,
        F: FnMut() -> Result<T, E>,
        R: Fn(&E) -> bool,
    {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match op() {
                Ok(value) => {
                    if attempts > 1 {
                        tracing::info!("{label}: succeeded on attempt {attempts}");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    if !is_retryable(&error) {
                        tracing::error!("{label}: {error} (not retryable)");
                        return Err(RetryFailure { attempts, error });
                    }
                    if attempts > self.max_retries {
                        tracing::error!("{label}: giving up after {attempts} attempts: {error}");
                        return Err(RetryFailure { attempts, error });
                    }
                    let delay = self.delay_after(attempts);
                    tracing::warn!(
                        "{label}: attempt {attempts} failed: {error}; retrying in {delay:?}"
                    );
                    std::thread::sleep(delay);
                }
            }
        }
    }

    /// Sleep duration after the `failed_attempts`-th failure (1-based).
    fn delay_after(&self, failed_attempts: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential => {
                // Shift capped so the multiplier cannot overflow.
                let factor = 1u32 << (failed_attempts - 1).min(16);
                self.interval.saturating_mul(factor).min(MAX_BACKOFF)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
