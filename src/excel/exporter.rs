//! Excel exporter implementation - in-memory Workbook → .xlsx

use crate::error::{DashboardError, DashboardResult};
use crate::types::{Cell, CellRef, CellStyle, CellValue, Sheet, Workbook};
use rust_xlsxwriter::{Format, Formula, Worksheet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Display format for date-time cells that carry no explicit format
pub const DEFAULT_DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Writes a [`Workbook`] to .xlsx, one worksheet per sheet in order
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    /// Export to `output_path`, creating missing parent directories first
    pub fn export(&self, output_path: &Path) -> DashboardResult<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DashboardError::WriteFailed(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut xlsx = rust_xlsxwriter::Workbook::new();

        for sheet in self.workbook.sheets() {
            let worksheet = xlsx.add_worksheet();
            Self::export_sheet(worksheet, sheet)?;
        }

        // Save workbook to file
        xlsx.save(output_path).map_err(|e| {
            DashboardError::WriteFailed(format!(
                "Failed to save {}: {}",
                output_path.display(),
                e
            ))
        })?;

        debug!(path = %output_path.display(), sheets = self.workbook.sheets().len(), "saved workbook");
        Ok(())
    }

    fn export_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> DashboardResult<()> {
        worksheet.set_name(&sheet.name).map_err(|e| {
            DashboardError::WriteFailed(format!(
                "Failed to set worksheet name '{}': {}",
                sheet.name, e
            ))
        })?;

        for (at, cell) in sheet.cells() {
            Self::write_cell(worksheet, *at, cell)?;
        }

        for (col, width) in sheet.column_widths() {
            worksheet.set_column_width(col, width).map_err(|e| {
                DashboardError::WriteFailed(format!("Failed to set column width: {}", e))
            })?;
        }

        Ok(())
    }

    /// Write a single cell with its style
    fn write_cell(worksheet: &mut Worksheet, at: CellRef, cell: &Cell) -> DashboardResult<()> {
        let format = Self::format_for(&cell.style, &cell.value);
        let (row, col) = (at.row, at.col);

        let result = match &cell.value {
            CellValue::Text(text) => worksheet.write_string_with_format(row, col, text, &format),
            CellValue::Number(n) | CellValue::DateTime(n) => {
                worksheet.write_number_with_format(row, col, *n, &format)
            }
            CellValue::Bool(b) => worksheet.write_boolean_with_format(row, col, *b, &format),
            CellValue::Formula(formula) => {
                worksheet.write_formula_with_format(row, col, Formula::new(formula), &format)
            }
            // An error literal is itself a valid formula (`=#N/A`)
            CellValue::Error(err) => {
                worksheet.write_formula_with_format(row, col, Formula::new(err), &format)
            }
        };

        result.map(|_| ()).map_err(|e| {
            DashboardError::WriteFailed(format!("Failed to write cell {}: {}", at, e))
        })
    }

    fn format_for(style: &CellStyle, value: &CellValue) -> Format {
        let mut format = Format::new();
        if style.bold {
            format = format.set_bold();
        }
        match (&style.number_format, value) {
            (Some(num_format), _) => format = format.set_num_format(num_format),
            (None, CellValue::DateTime(_)) => format = format.set_num_format(DEFAULT_DATETIME_FORMAT),
            _ => {}
        }
        format
    }
}
