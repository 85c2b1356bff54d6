//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.
//!
//! # Coverage Exclusion
//! These tests are skipped during coverage runs because the binary is built
//! without instrumentation there.

#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use calamine::{open_workbook, Reader, Xlsx};
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("jira-dashboard").unwrap();
    cmd.env_remove("JIRA_DASHBOARD_LOCALE").env_remove("RUST_LOG");
    cmd
}

fn write_sample(dir: &TempDir) -> std::path::PathBuf {
    let input = dir.path().join("test_chamados.xlsx");
    cmd().arg("sample").arg(&input).assert().success();
    input
}

fn ratio_formula(path: &std::path::Path) -> String {
    let mut xlsx: Xlsx<_> = open_workbook(path).unwrap();
    let formulas = xlsx.worksheet_formula("Dashboard").unwrap();
    formulas.get_value((4, 1)).cloned().unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("jira-dashboard"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jira-dashboard"));
}

#[test]
fn test_run_help_lists_locales() {
    cmd()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--locale"))
        .stdout(predicate::str::contains("CONT.VALORES"));
}

// ═══════════════════════════════════════════════════════════════════════════
// RUN COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_run_success_prints_output_path() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = dir.path().join("Dashboard.xlsx");

    cmd()
        .arg("run")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains(output.display().to_string()));

    assert!(output.exists());
    assert_eq!(ratio_formula(&output), "IF(B3=0,0,B4/B3)");
}

#[test]
fn test_run_portuguese_locale() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = dir.path().join("Dashboard.xlsx");

    cmd()
        .arg("run")
        .arg(&input)
        .arg(&output)
        .args(["--locale", "pt"])
        .assert()
        .success();

    assert_eq!(ratio_formula(&output), "SE(B3=0;0;B4/B3)");
}

#[test]
fn test_run_locale_from_environment() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = dir.path().join("Dashboard.xlsx");

    cmd()
        .env("JIRA_DASHBOARD_LOCALE", "pt")
        .arg("run")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    assert_eq!(ratio_formula(&output), "SE(B3=0;0;B4/B3)");
}

#[test]
fn test_run_default_output_name() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    cmd()
        .current_dir(dir.path())
        .arg("run")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard_Chamados_Jira.xlsx"));

    assert!(dir.path().join("Dashboard_Chamados_Jira.xlsx").exists());
}

#[test]
fn test_run_creates_output_directory() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = dir.path().join("reports").join("q3").join("Dashboard.xlsx");

    cmd().arg("run").arg(&input).arg(&output).assert().success();

    assert!(output.exists());
}

#[test]
fn test_run_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("Dashboard.xlsx");

    cmd()
        .arg("run")
        .arg(dir.path().join("nope.xlsx"))
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("nope.xlsx"));

    assert!(!output.exists());
}

#[test]
fn test_run_malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.xlsx");
    std::fs::write(&input, "Pedido,SLA\nP1,Fora do SLA\n").unwrap();

    cmd()
        .arg("run")
        .arg(&input)
        .arg(dir.path().join("out.xlsx"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_run_rejects_unknown_locale_flag() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    cmd()
        .arg("run")
        .arg(&input)
        .args(["--locale", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fr"));
}

#[test]
fn test_run_missing_input_argument() {
    cmd().arg("run").assert().failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT & SAMPLE COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_inspect_shows_formulas_and_values() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = dir.path().join("Dashboard.xlsx");
    cmd().arg("run").arg(&input).arg(&output).assert().success();

    cmd()
        .arg("inspect")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("=COUNTA(Base_Dados!A:A)-1"))
        .stdout(predicate::str::contains("=IF(B3=0,0,B4/B3)"))
        .stdout(predicate::str::contains("60.00%"))
        .stdout(predicate::str::contains("2.2"));
}

#[test]
fn test_inspect_portuguese_dashboard() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = dir.path().join("Dashboard.xlsx");
    cmd()
        .arg("run")
        .arg(&input)
        .arg(&output)
        .args(["--locale", "pt"])
        .assert()
        .success();

    cmd()
        .arg("inspect")
        .arg(&output)
        .args(["--locale", "pt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=SE(B3=0;0;B4/B3)"))
        .stdout(predicate::str::contains("Chamados Fora do SLA"))
        .stdout(predicate::str::contains("60.00%"));
}

#[test]
fn test_inspect_with_other_locale_warns() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = dir.path().join("Dashboard.xlsx");
    cmd()
        .arg("run")
        .arg(&input)
        .arg(&output)
        .args(["--locale", "pt"])
        .assert()
        .success();

    cmd()
        .arg("inspect")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not evaluate"))
        .stdout(predicate::str::contains("#NAME?"));
}

#[test]
fn test_inspect_without_dashboard_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    cmd()
        .arg("inspect")
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Sheet not found: Dashboard"));
}

#[test]
fn test_sample_default_path() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("test_chamados.xlsx"));

    assert!(dir.path().join("test_chamados.xlsx").exists());
}
