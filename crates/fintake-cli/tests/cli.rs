//! End-to-end tests for the fintake binary.
//!
//! Every test removes the inference credential from the environment so the
//! pipeline deterministically takes the heuristic path.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const STATEMENT: &str = "\
9/9/2025, 3:51:00 AM INCOME sharemarket monthly-salary +$12000.00
9/7/2025 1:32:00 AM EXPENSE groceries weekly-shop $85.40
this line is noise
";

const RECEIPT: &str = "\
CORNER DELI
123 Main Street
2x Sandwich      11.00
Coffee            3.50
Total            15.95
Thank you for visiting!
";

fn fintake() -> Command {
    let mut cmd = Command::cargo_bin("fintake").unwrap();
    cmd.env_remove("HF_TOKEN");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(stdout.trim()).unwrap()
}

#[test]
fn test_parse_preview_shape() {
    let dir = TempDir::new().unwrap();
    let statement = dir.path().join("statement.txt");
    std::fs::write(&statement, STATEMENT).unwrap();

    let preview = stdout_json(fintake().arg("parse").arg(&statement));

    assert_eq!(preview["count"], 3);
    let records = preview["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["date-time"], "9/9/2025, 3:51:00 AM");
    assert_eq!(records[0]["type"], "INCOME");
    assert_eq!(records[0]["category"], "sharemarket");
    assert_eq!(records[0]["description"], "monthly-salary");
    assert_eq!(records[0]["amount"], "+$12000.00");

    assert_eq!(records[1]["amount"], "$85.40");

    // The noise line still yields a full, empty-field record.
    assert_eq!(records[2]["amount"], "");
}

#[test]
fn test_parse_csv_output() {
    let dir = TempDir::new().unwrap();
    let statement = dir.path().join("statement.txt");
    std::fs::write(&statement, STATEMENT).unwrap();

    fintake()
        .arg("parse")
        .arg(&statement)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "date-time,type,category,description,amount",
        ))
        .stdout(predicate::str::contains("sharemarket"));
}

#[test]
fn test_import_statement_reports_partial_success() {
    let dir = TempDir::new().unwrap();
    let statement = dir.path().join("statement.txt");
    let ledger = dir.path().join("ledger.jsonl");
    std::fs::write(&statement, STATEMENT).unwrap();

    let report = stdout_json(
        fintake()
            .arg("import")
            .arg(&statement)
            .arg("--ledger")
            .arg(&ledger),
    );

    assert_eq!(report["imported"], 2);
    assert_eq!(report["total"], 3);

    let outcomes = report["perRecord"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0]["created"], true);
    assert_eq!(outcomes[0]["id"], "txn-1");
    assert_eq!(outcomes[2]["created"], false);

    let ledger_content = std::fs::read_to_string(&ledger).unwrap();
    assert_eq!(ledger_content.lines().count(), 2);
    let first: Value = serde_json::from_str(ledger_content.lines().next().unwrap()).unwrap();
    assert_eq!(first["type"], "INCOME");
    assert_eq!(first["amount_cents"], 1_200_000);
    assert_eq!(first["source"], "pdf-heuristic");
}

#[test]
fn test_import_json_records_shape_validation() {
    let dir = TempDir::new().unwrap();
    let records = dir.path().join("records.json");
    let ledger = dir.path().join("ledger.jsonl");
    std::fs::write(
        &records,
        r#"{"count": 2, "records": [
            {"date-time": "9/7/2025 1:32:00 AM", "type": "EXPENSE", "category": "groceries", "description": "weekly-shop", "amount": "$85.40"},
            {"date-time": "9/7/2025 1:32:00 AM", "type": "EXPENSE"}
        ]}"#,
    )
    .unwrap();

    let report = stdout_json(
        fintake()
            .arg("import")
            .arg(&records)
            .arg("--ledger")
            .arg(&ledger),
    );

    assert_eq!(report["imported"], 1);
    assert_eq!(report["total"], 2);
    assert_eq!(report["perRecord"][1]["reason"], "invalid_record_shape");
}

#[test]
fn test_receipt_import() {
    let dir = TempDir::new().unwrap();
    let receipt = dir.path().join("receipt.txt");
    let ledger = dir.path().join("ledger.jsonl");
    std::fs::write(&receipt, RECEIPT).unwrap();

    let response = stdout_json(
        fintake()
            .arg("receipt")
            .arg(&receipt)
            .arg("--ledger")
            .arg(&ledger),
    );

    assert_eq!(response["id"], "txn-1");
    assert_eq!(response["amount_cents"], 1595);
    assert_eq!(response["merchant"], "CORNER DELI");

    let row: Value =
        serde_json::from_str(std::fs::read_to_string(&ledger).unwrap().trim()).unwrap();
    assert_eq!(row["type"], "EXPENSE");
    assert_eq!(row["category"], "Uncategorized");
    assert_eq!(row["source"], "receipt");
    assert_eq!(row["merchant"], "CORNER DELI");
}

#[test]
fn test_receipt_without_amount_fails_with_text() {
    let dir = TempDir::new().unwrap();
    let receipt = dir.path().join("receipt.txt");
    std::fs::write(&receipt, "SOME SHOP\nilleg ible sc an\n").unwrap();

    fintake()
        .arg("receipt")
        .arg(&receipt)
        .arg("--ledger")
        .arg(dir.path().join("ledger.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("illeg ible sc an"));
}

#[test]
fn test_unsupported_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("statement.docx");
    std::fs::write(&input, "whatever").unwrap();

    fintake()
        .arg("parse")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported file format"));
}

#[test]
fn test_config_path_prints_location() {
    fintake()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fintake"));
}
