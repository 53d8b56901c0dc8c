//! Human-readable run summary: counts, per-repository table, failures.

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use orgsync_core::paths::repo_dir_name;
use orgsync_sync::{SyncOutcome, SyncReport};

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "repository")]
    repository: String,
    #[tabled(rename = "result")]
    result: String,
    #[tabled(rename = "detail")]
    detail: String,
}

pub fn print(report: &SyncReport) {
    let cloned = report.cloned_count();
    let pulled = report.pulled_count();
    let failed = report.failed().count();

    println!(
        "Orgsync v{} | '{}' | {} repositories | {} cloned | {} pulled | {}",
        env!("CARGO_PKG_VERSION"),
        report.org,
        report.outcomes.len(),
        cloned,
        pulled,
        if failed > 0 {
            format!("{failed} failed").red().to_string()
        } else {
            "0 failed".green().to_string()
        },
    );

    if report.outcomes.is_empty() {
        println!("Organization has no repositories.");
        return;
    }

    let rows: Vec<OutcomeRow> = report.outcomes.iter().map(outcome_row).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if failed > 0 {
        println!("{}", "Failed repositories:".red().bold());
        for outcome in report.failed() {
            if let SyncOutcome::Failed {
                url,
                attempts,
                error,
            } = outcome
            {
                println!("  ✗ {url} ({attempts} attempts): {error}");
            }
        }
    }
}

fn outcome_row(outcome: &SyncOutcome) -> OutcomeRow {
    // Table rows show the short directory name; failures keep the full URL.
    let short = |o: &SyncOutcome| {
        repo_dir_name(o.url()).unwrap_or_else(|_| o.url().to_string())
    };
    match outcome {
        SyncOutcome::Cloned { path, .. } => OutcomeRow {
            repository: short(outcome),
            result: "cloned".to_string(),
            detail: path.display().to_string(),
        },
        SyncOutcome::Pulled { path, .. } => OutcomeRow {
            repository: short(outcome),
            result: "pulled".to_string(),
            detail: path.display().to_string(),
        },
        SyncOutcome::Failed { url, error, .. } => OutcomeRow {
            repository: url.to_string(),
            result: "failed".to_string(),
            detail: error.clone(),
        },
    }
}
