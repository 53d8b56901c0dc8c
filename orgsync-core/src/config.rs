//! Process-wide configuration: load, merge, validate.
//!
//! Resolution order (highest wins): CLI args → environment → config file →
//! built-in defaults. The config file is YAML at `<home>/.orgsync/config.yaml`
//! unless an explicit path is given.
//!
//! # API pattern
//!
//! - [`resolve_at`] — explicit home and environment map; used in tests
//! - [`resolve`] — derives home from `dirs::home_dir()` and reads the real
//!   process environment, delegates to `resolve_at`
//!
//! Tests must NEVER call [`resolve`]; always use [`resolve_at`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::OrgName;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Conservative retry defaults.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_INTERVAL_SECS: u64 = 5;

// ---------------------------------------------------------------------------
// Backoff
// ---------------------------------------------------------------------------

/// Sleep strategy between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    /// Fixed interval between attempts (source-compatible default).
    #[default]
    Fixed,
    /// Interval doubles per attempt, capped at 60s.
    Exponential,
}

impl FromStr for Backoff {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(Backoff::Fixed),
            "exponential" => Ok(Backoff::Exponential),
            other => Err(format!(
                "unknown backoff '{other}'; expected: fixed, exponential"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Immutable process configuration, constructed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Organization whose repositories are mirrored.
    pub org: OrgName,
    /// Hosting-platform API token, passed through as-is.
    pub token: String,
    /// Local root directory under which repositories are materialized.
    pub root: PathBuf,
    /// Optional log destination; stderr when absent.
    pub log_file: Option<PathBuf>,
    /// Retries after the first attempt of each fallible unit of work.
    pub max_retries: u32,
    /// Base sleep between attempts.
    pub retry_interval: Duration,
    pub backoff: Backoff,
    /// Remote name used for pulls.
    pub remote: String,
    /// Branch name used for pulls.
    pub branch: String,
    /// Hosting API base URL (override for tests / GitHub Enterprise).
    pub api_base: String,
}

/// On-disk YAML config. Every field optional; merged under env and CLI args.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    org: Option<String>,
    token: Option<String>,
    root: Option<PathBuf>,
    log_file: Option<PathBuf>,
    max_retries: Option<u32>,
    retry_interval_secs: Option<u64>,
    backoff: Option<Backoff>,
    remote: Option<String>,
    branch: Option<String>,
    api_base: Option<String>,
}

/// `<home>/.orgsync/config.yaml` — pure, no I/O.
pub fn default_config_path(home: &Path) -> PathBuf {
    home.join(".orgsync").join("config.yaml")
}

fn load_file(home: &Path, explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path(home), false),
    };
    if !path.exists() {
        if required {
            return Err(ConfigError::ConfigNotFound { path });
        }
        return Ok(ConfigFile::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

fn parsed_env<T: FromStr>(
    env: &BTreeMap<String, String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match env.get(key) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
        }),
    }
}

/// Resolve the full configuration from explicit inputs.
///
/// `env` is the process environment as a map; `org_arg` / `token_arg` are the
/// CLI positionals. Missing org or token after the merge is a [`ConfigError`].
pub fn resolve_at(
    home: &Path,
    config_path: Option<&Path>,
    env: &BTreeMap<String, String>,
    org_arg: Option<&str>,
    token_arg: Option<&str>,
) -> Result<Config, ConfigError> {
    let file = load_file(home, config_path)?;

    let org = org_arg
        .map(str::to_owned)
        .or_else(|| env.get("ORGSYNC_ORG").cloned())
        .or(file.org)
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::MissingOrg)?;

    let token = token_arg
        .map(str::to_owned)
        .or_else(|| env.get("ORGSYNC_TOKEN").cloned())
        .or_else(|| env.get("GITHUB_TOKEN").cloned())
        .or(file.token)
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::MissingToken)?;

    let root = env
        .get("ORGSYNC_ROOT")
        .map(PathBuf::from)
        .or(file.root)
        .unwrap_or_else(|| home.join("orgsync"));

    let log_file = env
        .get("ORGSYNC_LOG_FILE")
        .map(PathBuf::from)
        .or(file.log_file);

    let max_retries = parsed_env(env, "ORGSYNC_MAX_RETRIES")?
        .or(file.max_retries)
        .unwrap_or(DEFAULT_MAX_RETRIES);

    let interval_secs = parsed_env(env, "ORGSYNC_RETRY_INTERVAL_SECS")?
        .or(file.retry_interval_secs)
        .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);

    let backoff = parsed_env(env, "ORGSYNC_BACKOFF")?
        .or(file.backoff)
        .unwrap_or_default();

    let remote = env
        .get("ORGSYNC_REMOTE")
        .cloned()
        .or(file.remote)
        .unwrap_or_else(|| "origin".to_owned());

    let branch = env
        .get("ORGSYNC_BRANCH")
        .cloned()
        .or(file.branch)
        .unwrap_or_else(|| "main".to_owned());

    let api_base = env
        .get("ORGSYNC_API_BASE")
        .cloned()
        .or(file.api_base)
        .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());

    Ok(Config {
        org: OrgName(org),
        token,
        root,
        log_file,
        max_retries,
        retry_interval: Duration::from_secs(interval_secs),
        backoff,
        remote,
        branch,
        api_base,
    })
}

/// `resolve_at` convenience wrapper over the real home and environment.
pub fn resolve(
    config_path: Option<&Path>,
    org_arg: Option<&str>,
    token_arg: Option<&str>,
) -> Result<Config, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    let env: BTreeMap<String, String> = std::env::vars().collect();
    resolve_at(&home, config_path, &env, org_arg, token_arg)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
