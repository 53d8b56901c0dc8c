//! Binary-level tests: argument surface, config validation, exit codes.
//!
//! These never reach a real hosting API — the only networked test points
//! api_base at a closed local port so the listing fails immediately.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn orgsync(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("orgsync").expect("binary");
    cmd.env_clear()
        .env("HOME", home.path())
        .env("USERPROFILE", home.path());
    cmd
}

#[test]
fn help_shows_usage() {
    let home = TempDir::new().unwrap();
    orgsync(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ORG]"))
        .stdout(predicate::str::contains("--config-path"));
}

#[test]
fn missing_org_exits_nonzero_before_any_sync() {
    let home = TempDir::new().unwrap();
    orgsync(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("organization"));
}

#[test]
fn missing_token_exits_nonzero() {
    let home = TempDir::new().unwrap();
    orgsync(&home)
        .arg("acme")
        .assert()
        .failure()
        .stderr(predicate::str::contains("token"));
}

#[test]
fn explicit_config_path_must_exist() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.yaml");
    orgsync(&home)
        .args(["acme", "t0k3n"])
        .arg("--config-path")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn unreachable_api_fails_the_run_with_nonzero_exit() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("config.yaml");
    std::fs::write(
        &config_path,
        concat!(
            "org: acme\n",
            "token: t0k3n\n",
            "api_base: http://127.0.0.1:9\n",
            "max_retries: 0\n",
            "retry_interval_secs: 0\n",
        ),
    )
    .unwrap();

    orgsync(&home)
        .arg("--config-path")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("sync failed for organization 'acme'"));
}
