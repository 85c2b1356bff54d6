use super::*;
use crate::dashboard::build_dashboard;
use crate::locale::{EN, PT};
use tempfile::TempDir;

// =========================================================================
// format_number Tests
// =========================================================================

#[test]
fn test_format_number_integer() {
    assert_eq!(format_number(5.0), "5");
    assert_eq!(format_number(0.0), "0");
}

#[test]
fn test_format_number_decimal() {
    assert_eq!(format_number(2.2), "2.2");
    assert_eq!(format_number(2.50), "2.5");
    assert_eq!(format_number(0.123456789), "0.123457");
}

// =========================================================================
// Report Line Tests
// =========================================================================

#[test]
fn test_metric_lines_fixture() {
    let metrics = DashboardMetrics {
        total: 5.0,
        out_of_sla: 3.0,
        out_of_sla_ratio: 0.6,
        average_delay: Some(2.2),
    };
    let lines = metric_lines(&metrics, &EN);

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Total Tickets"));
    assert!(lines[0].ends_with(" 5"));
    assert!(lines[1].ends_with(" 3"));
    assert!(lines[2].ends_with("60.00%"));
    assert!(lines[3].ends_with("2.2"));
}

#[test]
fn test_metric_lines_portuguese_captions() {
    let metrics = DashboardMetrics {
        total: 5.0,
        out_of_sla: 3.0,
        out_of_sla_ratio: 0.6,
        average_delay: Some(2.2),
    };
    let lines = metric_lines(&metrics, &PT);

    assert!(lines[0].starts_with("Total de Chamados"));
    assert!(lines[3].starts_with("Média Dias em Atraso"));
}

#[test]
fn test_metric_lines_no_tickets() {
    let metrics = DashboardMetrics {
        total: -1.0,
        out_of_sla: 0.0,
        out_of_sla_ratio: 0.0,
        average_delay: None,
    };
    let lines = metric_lines(&metrics, &EN);

    assert!(lines[0].ends_with(" -1"));
    assert!(lines[2].ends_with("0.00%"));
    assert!(lines[3].ends_with("#DIV/0!"));
}

#[test]
fn test_formula_lines_portuguese() {
    let sheet = crate::dashboard::dashboard_sheet(&PT);
    let lines = formula_lines(&sheet);

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("B3"));
    assert!(lines[0].contains("Total de Chamados"));
    assert!(lines[0].ends_with("=CONT.VALORES(Base_Dados!A:A)-1"));
    assert!(lines[2].ends_with("=SE(B3=0;0;B4/B3)"));
}

#[test]
fn test_formula_lines_missing_cells() {
    let lines = formula_lines(&Sheet::new(DASHBOARD_SHEET));
    assert!(lines.iter().all(|l| l.ends_with("(empty)")));
}

// =========================================================================
// Command Tests
// =========================================================================

#[test]
fn test_sample_then_run_then_inspect() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("chamados.xlsx");
    let output = dir.path().join("out").join("dashboard.xlsx");

    sample(input.clone()).unwrap();
    run(input, output.clone(), "pt".to_string(), true).unwrap();
    assert!(output.exists());

    inspect(output, "pt".to_string()).unwrap();
}

#[test]
fn test_run_missing_input() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("dashboard.xlsx");

    let result = run(
        dir.path().join("missing.xlsx"),
        output.clone(),
        "en".to_string(),
        false,
    );

    assert!(matches!(result, Err(DashboardError::InputNotFound(_))));
    assert!(!output.exists());
}

#[test]
fn test_inspect_without_dashboard_sheet() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("chamados.xlsx");
    sample(input.clone()).unwrap();

    let result = inspect(input, "en".to_string());
    assert!(matches!(result, Err(DashboardError::SheetNotFound(_))));
}

#[test]
fn test_inspect_after_build() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("chamados.xlsx");
    let output = dir.path().join("dashboard.xlsx");
    sample(input.clone()).unwrap();
    build_dashboard(&input, &output, "en").unwrap();

    assert!(inspect(output, "en".to_string()).is_ok());
}
