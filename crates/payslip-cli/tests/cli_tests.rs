//! End-to-end tests for the `payslip` binary.

use std::path::Path;

use assert_cmd::Command;
use payslip_core::fixtures::{sample_payslip, text_pdf};
use predicates::prelude::*;
use tempfile::TempDir;

/// `payslip` with its config and data directories inside `home`.
fn payslip(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("payslip").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("PAYSLIP_HOST")
        .env_remove("PAYSLIP_PORT")
        .env_remove("PAYSLIP_DATABASE")
        .env_remove("PAYSLIP_MAX_UPLOAD_BYTES")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

fn write_pdf(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    path
}

#[test]
fn test_extract_prints_fields_as_json() {
    let home = TempDir::new().unwrap();
    let pdf = write_pdf(&home, "payslip.pdf", &sample_payslip());

    let output = payslip(home.path()).arg("extract").arg(&pdf).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["fields"]["net_pay"], "2500.00");
    assert_eq!(json["fields"]["employment_type"], "Contractor");
    assert_eq!(json["pages"], 1);
    assert_eq!(json["diagnostics"], serde_json::json!([]));
}

#[test]
fn test_extract_text_format_marks_missing_fields() {
    let home = TempDir::new().unwrap();
    let pdf = write_pdf(&home, "partial.pdf", &text_pdf(&[&["Employment Type: Full-Time"]]));

    payslip(home.path())
        .args(["extract", "--format", "text"])
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("employment_type: Full-Time"))
        .stdout(predicate::str::contains("net_pay: (not found)"));
}

#[test]
fn test_extract_rejects_non_pdf() {
    let home = TempDir::new().unwrap();
    let file = write_pdf(&home, "notes.pdf", b"Net Pay: $1.00");

    payslip(home.path())
        .arg("extract")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid document"));
}

#[test]
fn test_extract_missing_file() {
    let home = TempDir::new().unwrap();

    payslip(home.path())
        .args(["extract", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_store_then_list() {
    let home = TempDir::new().unwrap();
    let pdf = write_pdf(&home, "payslip.pdf", &sample_payslip());
    let db = home.path().join("records.db");

    for _ in 0..2 {
        payslip(home.path())
            .args(["extract", "--user-id", "42", "--database"])
            .arg(&db)
            .arg(&pdf)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"userId\": 42"));
    }

    let output = payslip(home.path())
        .args(["list", "--user-id", "42", "--format", "json", "--database"])
        .arg(&db)
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["net_pay"], "2500.00");
    assert_eq!(records[0]["employment_type"], "Contractor");
    assert!(records[0]["created_at"].as_str() >= records[1]["created_at"].as_str());

    payslip(home.path())
        .args(["list", "--user-id", "42", "--format", "csv", "--database"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,user_id,net_pay,employment_type,created_at"))
        .stdout(predicate::str::contains(",42,2500.00,Contractor,"));

    payslip(home.path())
        .args(["list", "--user-id", "7", "--database"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("No payslips stored for submitter 7"));
}

#[test]
fn test_invalid_user_id_is_rejected() {
    let home = TempDir::new().unwrap();
    let pdf = write_pdf(&home, "payslip.pdf", &sample_payslip());

    payslip(home.path())
        .args(["extract", "--user-id", "abc"])
        .arg(&pdf)
        .assert()
        .failure()
        .stderr(predicate::str::contains("user_id must be an integer"));
}

#[test]
fn test_config_init_get_set() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("conf").join("payslip.json");

    payslip(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(config.exists());

    payslip(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    payslip(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "server.port", "8080"])
        .assert()
        .success();

    payslip(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "server.port"])
        .assert()
        .success()
        .stdout(predicate::str::diff("8080\n"));

    payslip(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "extraction.fields.0.label"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Net Pay"));

    payslip(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "server.port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));

    payslip(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "server.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_configured_fields_drive_extraction() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("payslip.json");
    std::fs::write(
        &config,
        r#"{"extraction": {"fields": [
            {"name": "net_pay", "label": "Net Pay", "kind": "currency"},
            {"name": "pay_date", "label": "Pay Date", "kind": "date"}
        ]}}"#,
    )
    .unwrap();
    let pdf = write_pdf(
        &home,
        "dated.pdf",
        &text_pdf(&[&["Pay Date: 2024-03-31", "Net Pay: $1,000.00"]]),
    );

    let output = payslip(home.path())
        .arg("-c")
        .arg(&config)
        .arg("extract")
        .arg(&pdf)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["fields"]["pay_date"], "2024-03-31");
    assert_eq!(json["fields"]["net_pay"], "1000.00");
    assert!(json["fields"].get("employment_type").is_none());
}

#[test]
fn test_config_path_honours_flag() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("custom.json");

    payslip(home.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.json"))
        .stdout(predicate::str::contains("not created"));
}
