//! Excel importer implementation - .xlsx → in-memory Workbook

use crate::error::{DashboardError, DashboardResult};
use crate::types::{CellRef, CellValue, Sheet, Workbook, MAX_COL};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads an .xlsx file into a [`Workbook`], keeping cell values and formulas
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the file. Fails with `InputNotFound` before touching calamine.
    pub fn import(&self) -> DashboardResult<Workbook> {
        if !self.path.exists() {
            return Err(DashboardError::InputNotFound(self.path.clone()));
        }

        let mut xlsx: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            DashboardError::MalformedInput(format!(
                "Failed to open {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut workbook = Workbook::new();

        for sheet_name in xlsx.sheet_names() {
            let values = xlsx.worksheet_range(&sheet_name).map_err(|e| {
                DashboardError::MalformedInput(format!(
                    "Failed to read sheet '{}': {}",
                    sheet_name, e
                ))
            })?;
            let formulas = xlsx.worksheet_formula(&sheet_name).map_err(|e| {
                DashboardError::MalformedInput(format!(
                    "Failed to read formulas of sheet '{}': {}",
                    sheet_name, e
                ))
            })?;

            let sheet = Self::build_sheet(&sheet_name, &values, &formulas);
            debug!(sheet = %sheet_name, cells = sheet.len(), "imported sheet");
            workbook.add_sheet(sheet)?;
        }

        Ok(workbook)
    }

    /// Merge the value grid and the formula grid of one worksheet
    fn build_sheet(name: &str, values: &Range<Data>, formulas: &Range<String>) -> Sheet {
        let mut sheet = Sheet::new(name);

        let origin = values.start().unwrap_or((0, 0));
        for (row, col, data) in values.used_cells() {
            if let (Some(at), Some(value)) = (
                Self::absolute(origin, row, col),
                Self::convert_data(data),
            ) {
                sheet.set(at, value);
            }
        }

        // Formula cells override their cached values
        let origin = formulas.start().unwrap_or((0, 0));
        for (row, col, formula) in formulas.used_cells() {
            if let Some(at) = Self::absolute(origin, row, col) {
                sheet.set(at, CellValue::Formula(Self::with_equals(formula)));
            }
        }

        sheet
    }

    fn absolute(origin: (u32, u32), row: usize, col: usize) -> Option<CellRef> {
        let row = origin.0.checked_add(u32::try_from(row).ok()?)?;
        let col = origin.1.checked_add(u32::try_from(col).ok()?)?;
        let col = u16::try_from(col).ok().filter(|c| *c <= MAX_COL)?;
        Some(CellRef::new(row, col))
    }

    /// Convert a calamine cell to a typed value; `None` for empty cells
    fn convert_data(data: &Data) -> Option<CellValue> {
        match data {
            Data::Empty => None,
            Data::String(s) => Some(CellValue::Text(s.clone())),
            Data::Float(f) => Some(CellValue::Number(*f)),
            Data::Int(i) => Some(CellValue::Number(*i as f64)),
            Data::Bool(b) => Some(CellValue::Bool(*b)),
            Data::DateTime(dt) => Some(CellValue::DateTime(dt.as_f64())),
            Data::Error(e) => Some(CellValue::Error(e.to_string())),
            other => Some(CellValue::Text(other.to_string())),
        }
    }

    /// calamine strips the leading `=`
    fn with_equals(formula: &str) -> String {
        if formula.starts_with('=') {
            formula.to_string()
        } else {
            format!("={}", formula)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.xlsx");

        let result = ExcelImporter::new(&missing).import();
        match result {
            Err(DashboardError::InputNotFound(path)) => assert_eq!(path, missing),
            other => panic!("Expected InputNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_import_not_a_workbook() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chamados.xlsx");
        std::fs::write(&path, "Pedido;Dias em Atraso;SLA\n").unwrap();

        let result = ExcelImporter::new(&path).import();
        assert!(matches!(result, Err(DashboardError::MalformedInput(_))));
    }

    #[test]
    fn test_convert_data() {
        assert_eq!(ExcelImporter::convert_data(&Data::Empty), None);
        assert_eq!(
            ExcelImporter::convert_data(&Data::Int(3)),
            Some(CellValue::Number(3.0))
        );
        assert_eq!(
            ExcelImporter::convert_data(&Data::String("Fora do SLA".to_string())),
            Some(CellValue::Text("Fora do SLA".to_string()))
        );
        assert_eq!(
            ExcelImporter::convert_data(&Data::Bool(false)),
            Some(CellValue::Bool(false))
        );
    }

    #[test]
    fn test_with_equals() {
        assert_eq!(ExcelImporter::with_equals("SUM(A:A)"), "=SUM(A:A)");
        assert_eq!(ExcelImporter::with_equals("=SUM(A:A)"), "=SUM(A:A)");
    }

    #[test]
    fn test_absolute_offsets_origin() {
        assert_eq!(
            ExcelImporter::absolute((2, 1), 0, 0),
            Some(CellRef::new(2, 1))
        );
        assert_eq!(
            ExcelImporter::absolute((0, 0), 4, 6),
            Some(CellRef::new(4, 6))
        );
        assert_eq!(ExcelImporter::absolute((0, 0), 0, 20_000), None);
    }
}
