//! In-place editing of an existing .xlsx package
//!
//! The exporter writes a workbook from scratch; the editor loads the whole
//! package instead (styles, number formats, column widths, merged ranges,
//! defined names, drawings) and only touches the sheets it is asked to
//! change. Everything else is saved back as it was read.

use crate::error::{DashboardError, DashboardResult};
use crate::types::{column_index_to_letter, Cell, CellRef, CellValue, Sheet};
use std::fs;
use std::path::Path;
use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

pub struct WorkbookEditor {
    book: Spreadsheet,
}

impl WorkbookEditor {
    /// A workbook with no sheets, held only in memory
    pub fn new() -> Self {
        Self {
            book: umya_spreadsheet::new_file_empty_worksheet(),
        }
    }

    /// Load `path` for editing. Fails with `InputNotFound` before reading.
    pub fn open<P: AsRef<Path>>(path: P) -> DashboardResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DashboardError::InputNotFound(path.to_path_buf()));
        }

        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
            DashboardError::MalformedInput(format!("Failed to open {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), sheets = book.get_sheet_count(), "opened workbook for editing");
        Ok(Self { book })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection_no_check()
            .iter()
            .map(|ws| ws.get_name().to_string())
            .collect()
    }

    /// Locate a sheet by name (case-insensitive, as Excel compares names)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.book
            .get_sheet_collection_no_check()
            .iter()
            .position(|ws| ws.get_name().eq_ignore_ascii_case(name))
    }

    pub fn worksheet(&self, name: &str) -> Option<&Worksheet> {
        self.position(name).and_then(|idx| self.book.get_sheet(&idx))
    }

    /// Rename the sheet at `index`; renaming a sheet to its own name is a no-op
    pub fn rename_sheet(&mut self, index: usize, new_name: &str) -> DashboardResult<()> {
        if let Some(existing) = self.position(new_name) {
            if existing != index {
                return Err(DashboardError::MalformedInput(format!(
                    "Cannot rename sheet at position {}: another sheet is already named '{}'",
                    index, new_name
                )));
            }
        }

        let worksheet = self.book.get_sheet_mut(&index).ok_or_else(|| {
            DashboardError::MalformedInput(format!("No sheet at position {}", index))
        })?;
        worksheet.set_name(new_name);
        Ok(())
    }

    /// Drop the sheet called `name`, if any. Returns whether one was removed.
    pub fn remove_sheet(&mut self, name: &str) -> DashboardResult<bool> {
        let Some(index) = self.position(name) else {
            return Ok(false);
        };

        self.book.remove_sheet(index).map_err(|e| {
            DashboardError::MalformedInput(format!("Failed to remove sheet '{}': {}", name, e))
        })?;
        Ok(true)
    }

    /// Append `sheet` as a new worksheet, with its cell styles and column widths
    pub fn add_sheet(&mut self, sheet: &Sheet) -> DashboardResult<()> {
        if self.position(&sheet.name).is_some() {
            return Err(DashboardError::MalformedInput(format!(
                "Duplicate sheet name '{}'",
                sheet.name
            )));
        }

        let worksheet = self.book.new_sheet(sheet.name.as_str()).map_err(|e| {
            DashboardError::MalformedInput(format!("Failed to add sheet '{}': {}", sheet.name, e))
        })?;

        for (at, cell) in sheet.cells() {
            Self::write_cell(worksheet, *at, cell);
        }

        for (col, width) in sheet.column_widths() {
            worksheet
                .get_column_dimension_mut(&column_index_to_letter(col))
                .set_width(width);
        }

        Ok(())
    }

    /// Save to `output_path`, creating missing parent directories first
    pub fn save(&self, output_path: &Path) -> DashboardResult<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DashboardError::WriteFailed(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        umya_spreadsheet::writer::xlsx::write(&self.book, output_path).map_err(|e| {
            DashboardError::WriteFailed(format!(
                "Failed to save {}: {}",
                output_path.display(),
                e
            ))
        })?;

        debug!(path = %output_path.display(), sheets = self.book.get_sheet_count(), "saved workbook");
        Ok(())
    }

    fn write_cell(worksheet: &mut Worksheet, at: CellRef, cell: &Cell) {
        let target = worksheet.get_cell_mut(at.to_string().as_str());

        match &cell.value {
            CellValue::Text(text) => {
                target.set_value_string(text.as_str());
            }
            CellValue::Number(n) | CellValue::DateTime(n) => {
                target.set_value_number(*n);
            }
            CellValue::Bool(b) => {
                target.set_value_bool(*b);
            }
            // Stored without the leading `=`; an error literal is itself a formula
            CellValue::Formula(formula) | CellValue::Error(formula) => {
                target.set_formula(formula.trim_start_matches('='));
            }
        }

        let style = target.get_style_mut();
        if cell.style.bold {
            style.get_font_mut().set_bold(true);
        }
        if let Some(num_format) = &cell.style.number_format {
            style
                .get_number_format_mut()
                .set_format_code(num_format.as_str());
        }
    }
}

impl Default for WorkbookEditor {
    fn default() -> Self {
        Self::new()
    }
}
