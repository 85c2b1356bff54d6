//! Excel I/O
//!
//! - Import: .xlsx → `Workbook` (values and formulas, via calamine)
//! - Export: `Workbook` → new .xlsx (values, formulas, bold/number formats and
//!   column widths, via rust_xlsxwriter)
//! - Edit: existing .xlsx → same package with sheets renamed, removed or
//!   added (via umya-spreadsheet), everything else kept as read

mod editor;
mod exporter;
mod importer;

pub use editor::WorkbookEditor;
pub use exporter::{ExcelExporter, DEFAULT_DATETIME_FORMAT};
pub use importer::ExcelImporter;

use crate::error::DashboardResult;
use crate::types::Workbook;
use std::path::Path;

/// Read an .xlsx file into memory
pub fn read_workbook<P: AsRef<Path>>(path: P) -> DashboardResult<Workbook> {
    ExcelImporter::new(path).import()
}

/// Write a workbook to .xlsx, creating parent directories as needed
pub fn write_workbook<P: AsRef<Path>>(workbook: &Workbook, path: P) -> DashboardResult<()> {
    ExcelExporter::new(workbook).export(path.as_ref())
}
