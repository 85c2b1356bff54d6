use crate::dashboard::{self, DASHBOARD_SHEET, METRIC_CELLS};
use crate::error::{DashboardError, DashboardResult};
use crate::excel::read_workbook;
use crate::locale::LocaleProfile;
use crate::metrics::{format_percent, DashboardMetrics};
use crate::sample::write_sample_workbook;
use crate::types::{CellRef, Sheet};
use colored::Colorize;
use std::path::PathBuf;

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Execute the run command: build the dashboard workbook
pub fn run(input: PathBuf, output: PathBuf, locale: String, verbose: bool) -> DashboardResult<()> {
    println!("{}", "📊 Jira Dashboard - Building summary".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}", output.display());
    println!("   Locale: {}\n", locale.bright_yellow());

    let written = dashboard::build_dashboard(&input, &output, &locale)?;

    if verbose {
        let workbook = read_workbook(&written)?;
        println!("   Sheets: {}", workbook.sheet_names().join(", "));
    }

    println!("{}", "✅ Dashboard saved".bold().green());
    println!("   {}", written.display());

    Ok(())
}

/// Execute the inspect command: show the dashboard formulas and what they evaluate to
///
/// `locale` is the syntax the formulas were written in.
pub fn inspect(file: PathBuf, locale: String) -> DashboardResult<()> {
    let profile = LocaleProfile::resolve(&locale);

    println!("{}", "🔍 Jira Dashboard - Inspect".bold().green());
    println!("   File:   {}", file.display());
    println!("   Locale: {}\n", profile.code.bright_yellow());

    let workbook = read_workbook(&file)?;
    let dashboard = workbook
        .sheet(DASHBOARD_SHEET)
        .ok_or_else(|| DashboardError::SheetNotFound(DASHBOARD_SHEET.to_string()))?;

    for line in formula_lines(dashboard) {
        println!("   {}", line);
    }
    println!();

    match DashboardMetrics::evaluate(&workbook, profile) {
        Ok(metrics) => {
            println!("{}", "📈 Evaluated values".cyan());
            for line in metric_lines(&metrics, profile) {
                println!("   {}", line);
            }
        }
        Err(e) => println!(
            "{}",
            format!("⚠️  Could not evaluate the formulas: {}", e).yellow()
        ),
    }

    Ok(())
}

/// Execute the sample command: write the sample ticket export
pub fn sample(output: PathBuf) -> DashboardResult<()> {
    let written = write_sample_workbook(&output)?;

    println!("{}", "✅ Sample workbook created".bold().green());
    println!("   {}", written.display());

    Ok(())
}

/// `B3  Total Tickets  =COUNTA(...)` for each metric row present in the sheet
fn formula_lines(dashboard: &Sheet) -> Vec<String> {
    METRIC_CELLS
        .iter()
        .map(|at| {
            let label = dashboard
                .get(CellRef::new(at.row, 0))
                .map(|c| c.value.to_string())
                .unwrap_or_default();
            let formula = dashboard
                .get(*at)
                .map(|c| c.value.to_string())
                .unwrap_or_else(|| "(empty)".to_string());
            format!("{:<4} {:<24} {}", at.to_string(), label, formula)
        })
        .collect()
}

/// One line per metric, captioned in the profile's language
fn metric_lines(metrics: &DashboardMetrics, profile: &LocaleProfile) -> Vec<String> {
    let labels = &profile.labels;
    let average = metrics
        .average_delay
        .map(format_number)
        .unwrap_or_else(|| "#DIV/0!".to_string());

    vec![
        format!("{:<24} {}", labels.total, format_number(metrics.total)),
        format!("{:<24} {}", labels.out_of_sla, format_number(metrics.out_of_sla)),
        format!(
            "{:<24} {}",
            labels.out_of_sla_pct,
            format_percent(metrics.out_of_sla_ratio)
        ),
        format!("{:<24} {}", labels.avg_delay, average),
    ]
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
