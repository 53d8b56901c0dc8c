//! Orgsync — mirror a GitHub organization's repositories locally.
//!
//! # Usage
//!
//! ```text
//! orgsync [ORG] [TOKEN] [--config-path <path>] [--json]
//! ```
//!
//! ORG and TOKEN fall back to the environment (`ORGSYNC_ORG`,
//! `ORGSYNC_TOKEN`/`GITHUB_TOKEN`) and then to the YAML config file at
//! `~/.orgsync/config.yaml` (or `--config-path`).
//!
//! Exits 0 only when every repository synced; configuration or listing
//! failure, or any repository left in `Failed`, exits 1.

mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use orgsync_core::config::{self, Config};
use orgsync_github::GithubLister;
use orgsync_sync::{sync_org, GitCli};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "orgsync",
    version,
    about = "Clone or pull every repository of a hosting-platform organization",
    long_about = None,
)]
struct Cli {
    /// Organization to mirror (falls back to config/environment).
    pub org: Option<String>,

    /// API access token (falls back to config/environment).
    pub token: Option<String>,

    /// Alternate configuration file.
    #[arg(long, value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Emit the run report as machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::resolve(
        cli.config_path.as_deref(),
        cli.org.as_deref(),
        cli.token.as_deref(),
    )
    .context("configuration error")?;

    init_logging(&config)?;
    tracing::info!(
        "syncing organization '{}' into {}",
        config.org,
        config.root.display()
    );

    let lister = GithubLister::new(&config.token, &config.api_base);
    let report = sync_org(&config, &lister, &GitCli)
        .with_context(|| format!("sync failed for organization '{}'", config.org))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report JSON")?
        );
    } else {
        summary::print(&report);
    }

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}

/// Route the `log` facade to stderr, or to the configured log file.
/// `RUST_LOG` overrides the default `info` level.
fn init_logging(config: &Config) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = &config.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
    Ok(())
}
