use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "ledger";

fn ledger(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("LEDGER_CLI_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn add(data_dir: &TempDir, title: &str, value: &str, kind: &str, category: &str) -> String {
    let output = ledger(data_dir)
        .args([
            "transaction",
            "add",
            title,
            value,
            "--type",
            kind,
            "--category",
            category,
        ])
        .output()
        .expect("command runs");
    assert!(output.status.success(), "add failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf-8 output")
}

fn id_from_add_output(stdout: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID:"))
        .map(|id| id.trim().to_string())
        .expect("add prints an id")
}

#[test]
fn cli_without_command_prints_usage_hint() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .assert()
        .success()
        .stdout(contains("ledger --help"));
}

#[test]
fn cli_empty_balance_is_zero() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(contains("Total:").and(contains("$0.00")));
}

#[test]
fn cli_add_income_then_balance() {
    let dir = TempDir::new().unwrap();
    let stdout = add(&dir, "Salary", "5000", "income", "Job");
    assert!(stdout.contains("Created transaction: Salary"));

    ledger(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(contains("$5000.00"));
}

#[test]
fn cli_overdraft_is_rejected() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Salary", "100", "income", "Job");

    ledger(&dir)
        .args([
            "transaction",
            "add",
            "TV",
            "100.01",
            "--type",
            "outcome",
            "--category",
            "Electronics",
        ])
        .assert()
        .failure()
        .stderr(contains("Error:").and(contains("exceeds available balance")));

    ledger(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("Job").and(contains("Electronics").not()));
}

#[test]
fn cli_outcome_equal_to_balance_succeeds() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Salary", "100", "income", "Job");
    add(&dir, "Rent", "100", "outcome", "Housing");

    ledger(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(contains("Total:").and(contains("$0.00")));
}

#[test]
fn cli_invalid_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args([
            "transaction",
            "add",
            "Salary",
            "10",
            "--type",
            "bonus",
            "--category",
            "Job",
        ])
        .assert()
        .failure();
}

#[test]
fn cli_delete_transaction() {
    let dir = TempDir::new().unwrap();
    let stdout = add(&dir, "Salary", "10", "income", "Job");
    let id = id_from_add_output(&stdout);

    ledger(&dir)
        .args(["transaction", "delete", &id])
        .assert()
        .success()
        .stdout(contains("Deleted transaction: Salary"));

    ledger(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(contains("No transactions found."));
}

#[test]
fn cli_delete_missing_transaction_fails() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["transaction", "delete", "2f1c9e8a-0000-4000-8000-000000000000"])
        .assert()
        .failure()
        .stderr(contains("Transaction not found"));
}

#[test]
fn cli_import_example_file() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("import.csv");
    fs::write(
        &csv,
        "title,type,value,category\nSalary,income,5000,Job\nRent,outcome,1200,Housing\n",
    )
    .unwrap();

    ledger(&dir)
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(contains("Imported 2 transaction(s), created 2 categories."));

    assert!(!csv.exists());

    ledger(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(
            contains("$5000.00")
                .and(contains("$1200.00"))
                .and(contains("$3800.00")),
        );

    ledger(&dir)
        .args(["transaction", "list", "--category", "Housing"])
        .assert()
        .success()
        .stdout(contains("Rent").and(contains("Salary").not()));
}

#[test]
fn cli_import_reports_skipped_rows() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("import.csv");
    fs::write(
        &csv,
        "title,type,value,category\nSalary,income,5000,Job\nBroken,income,abc,Job\n",
    )
    .unwrap();

    ledger(&dir)
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(contains("Imported 1 transaction(s)").and(contains("row 3:")));
}

#[test]
fn cli_import_abort_policy_keeps_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{ "import": { "on_malformed": "abort" } }"#,
    )
    .unwrap();
    let csv = dir.path().join("import.csv");
    fs::write(&csv, "title,type,value,category\nBroken,income,abc,Job\n").unwrap();

    ledger(&dir)
        .arg("import")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(contains("Malformed record at row 2"));

    assert!(csv.exists());
}

#[test]
fn cli_import_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .args(["import", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(contains("Import error"));
}

#[test]
fn cli_history_lists_changes() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Salary", "10", "income", "Job");

    ledger(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(contains("CREATE Category").and(contains("CREATE Transaction")));
}

#[test]
fn cli_config_shows_paths() {
    let dir = TempDir::new().unwrap();
    ledger(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Data directory:").and(contains("Category matching:   Exact")));
}
