//! Values the dashboard formulas evaluate to
//!
//! The written workbook only ever holds formulas. This module evaluates the
//! four formulas actually present on a workbook's `Dashboard` sheet so the
//! CLI can show what a spreadsheet application will display.

use crate::dashboard::{AVG_DELAY_CELL, DASHBOARD_SHEET, OUT_OF_SLA_CELL, RATIO_CELL, TOTAL_CELL};
use crate::error::{DashboardError, DashboardResult};
use crate::evaluator::FormulaEvaluator;
use crate::locale::LocaleProfile;
use crate::types::Workbook;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    /// `COUNTA(A:A)-1`; negative when column A is entirely empty
    pub total: f64,
    pub out_of_sla: f64,
    /// Guarded ratio, `0` only when `total` is exactly zero
    pub out_of_sla_ratio: f64,
    /// `None` where AVERAGE yields `#DIV/0!`
    pub average_delay: Option<f64>,
}

impl DashboardMetrics {
    /// Evaluate the dashboard of `workbook`, written in `profile`'s syntax
    pub fn evaluate(workbook: &Workbook, profile: &'static LocaleProfile) -> DashboardResult<Self> {
        let evaluator = FormulaEvaluator::new(workbook, DASHBOARD_SHEET, profile)?;

        let average_delay = match evaluator.evaluate_cell(AVG_DELAY_CELL) {
            Ok(average) => Some(average),
            Err(DashboardError::DivisionByZero(_)) => None,
            Err(e) => return Err(e),
        };

        Ok(Self {
            total: evaluator.evaluate_cell(TOTAL_CELL)?,
            out_of_sla: evaluator.evaluate_cell(OUT_OF_SLA_CELL)?,
            out_of_sla_ratio: evaluator.evaluate_cell(RATIO_CELL)?,
            average_delay,
        })
    }
}

/// Render a ratio the way the `0.00%` number format displays it
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
