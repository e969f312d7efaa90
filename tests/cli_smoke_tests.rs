use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "wallet_cli";

fn cli_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("WALLET_CORE_HOME", home.path());
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_help_lists_commands() {
    let home = TempDir::new().unwrap();
    cli_command(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(contains("summary").and(contains("export <path>")));
}

#[test]
fn cli_version_prints_package_version() {
    let home = TempDir::new().unwrap();
    cli_command(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains("Wallet Core").and(contains(env!("CARGO_PKG_VERSION"))));
}

#[test]
fn cli_summary_reports_sample_data() {
    let home = TempDir::new().unwrap();
    cli_command(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(
            contains("Transactions: 10")
                .and(contains("Total Income: $7,500.00"))
                .and(contains("Total Expenses: $1,706.50")),
        );
}

#[test]
fn cli_parse_reformats_amount() {
    let home = TempDir::new().unwrap();
    cli_command(&home)
        .args(["parse", "1250-"])
        .assert()
        .success()
        .stdout(contains("-$1,250.00 (-1250.00)"));
}

#[test]
fn cli_parse_rejects_garbage() {
    let home = TempDir::new().unwrap();
    cli_command(&home)
        .args(["parse", "abc"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount `abc`"));
}

#[test]
fn cli_budget_rejects_non_positive_limit() {
    let home = TempDir::new().unwrap();
    cli_command(&home)
        .args(["budget", "0"])
        .assert()
        .failure()
        .stderr(contains("Validation failed"));
}

#[test]
fn cli_export_writes_csv_file() {
    let home = TempDir::new().unwrap();
    let target = home.path().join("export.csv");
    cli_command(&home)
        .arg("export")
        .arg(&target)
        .assert()
        .success()
        .stdout(contains("Exported 10 transactions"));
    let text = fs::read_to_string(&target).unwrap();
    assert!(text.starts_with("#,Amount,Type,Category,Description,Date\n"));
    assert_eq!(text.lines().count(), 11);
}

#[test]
fn cli_unknown_command_fails_with_usage() {
    let home = TempDir::new().unwrap();
    cli_command(&home)
        .arg("frobnicate")
        .assert()
        .failure()
        .stdout(contains("Usage:"));
}
