use crate::error::{DashboardError, DashboardResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Last addressable row (0-based) in an .xlsx worksheet
pub const MAX_ROW: u32 = 1_048_575;
/// Last addressable column (0-based, `XFD`) in an .xlsx worksheet
pub const MAX_COL: u16 = 16_383;

static A1_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$?([A-Za-z]{1,3})\$?([0-9]{1,7})$").expect("A1 pattern is valid")
});

//==============================================================================
// Cell Addressing
//==============================================================================

/// Zero-based cell coordinate
///
/// Ordered row-major so a sheet's cells iterate the way a spreadsheet is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse an `A1`-style address (absolute markers are accepted and dropped)
    pub fn parse(address: &str) -> DashboardResult<Self> {
        let caps = A1_PATTERN
            .captures(address.trim())
            .ok_or_else(|| DashboardError::InvalidCellRef(address.to_string()))?;

        let col = column_letter_to_index(&caps[1])
            .filter(|c| *c <= MAX_COL)
            .ok_or_else(|| DashboardError::InvalidCellRef(address.to_string()))?;
        let row: u32 = caps[2]
            .parse()
            .ok()
            .filter(|r| (1..=MAX_ROW + 1).contains(r))
            .ok_or_else(|| DashboardError::InvalidCellRef(address.to_string()))?;

        Ok(Self { row: row - 1, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_index_to_letter(self.col), self.row + 1)
    }
}

/// Convert a column index to an Excel column letter
///
/// Examples:
/// - 0 → A
/// - 25 → Z
/// - 26 → AA
pub fn column_index_to_letter(index: u16) -> String {
    let mut result = String::new();
    let mut idx = index as u32;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Inverse of [`column_index_to_letter`]; `None` for anything but ASCII letters
pub fn column_letter_to_index(letters: &str) -> Option<u16> {
    if letters.is_empty() {
        return None;
    }

    let mut acc: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        acc = acc * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if acc > u16::MAX as u32 {
            return None;
        }
    }

    Some((acc - 1) as u16)
}

//==============================================================================
// Cells
//==============================================================================

/// Typed cell content
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel serial date-time
    DateTime(f64),
    /// Formula text including the leading `=`, never pre-evaluated
    Formula(String),
    /// Error literal such as `#N/A`
    Error(String),
}

impl CellValue {
    /// Numeric view used by aggregates (AVERAGE ignores text and booleans)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) | CellValue::DateTime(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// COUNTA treats everything except an empty string as a value
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) | CellValue::Formula(s) | CellValue::Error(s) => f.write_str(s),
            CellValue::Number(n) | CellValue::DateTime(n) => write!(f, "{}", n),
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub bold: bool,
    pub number_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style: CellStyle::default(),
        }
    }
}

//==============================================================================
// Sheets & Workbook
//==============================================================================

/// A named worksheet holding a sparse grid of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<CellRef, Cell>,
    column_widths: BTreeMap<u16, f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
        }
    }

    /// Set a cell's value, keeping any style already applied to it
    pub fn set(&mut self, at: CellRef, value: CellValue) -> &mut Cell {
        let cell = self
            .cells
            .entry(at)
            .or_insert_with(|| Cell::new(value.clone()));
        cell.value = value;
        cell
    }

    pub fn set_text(&mut self, at: CellRef, text: impl Into<String>) -> &mut Cell {
        self.set(at, CellValue::Text(text.into()))
    }

    pub fn set_number(&mut self, at: CellRef, value: f64) -> &mut Cell {
        self.set(at, CellValue::Number(value))
    }

    pub fn set_formula(&mut self, at: CellRef, formula: impl Into<String>) -> &mut Cell {
        self.set(at, CellValue::Formula(formula.into()))
    }

    pub fn get(&self, at: CellRef) -> Option<&Cell> {
        self.cells.get(&at)
    }

    pub fn get_mut(&mut self, at: CellRef) -> Option<&mut Cell> {
        self.cells.get_mut(&at)
    }

    /// All populated cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (&CellRef, &Cell)> {
        self.cells.iter()
    }

    /// Populated cells of one column, top to bottom
    pub fn column(&self, col: u16) -> impl Iterator<Item = (u32, &Cell)> {
        self.cells
            .iter()
            .filter(move |(at, _)| at.col == col)
            .map(|(at, cell)| (at.row, cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.column_widths.iter().map(|(c, w)| (*c, *w))
    }
}

/// An ordered collection of uniquely named sheets
///
/// The first sheet is the one a spreadsheet application shows on open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A workbook holding a single sheet
    pub fn with_sheet(sheet: Sheet) -> Self {
        Self {
            sheets: vec![sheet],
        }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Locate a sheet by name (case-insensitive, as Excel compares names)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.sheets
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.position(name).map(|idx| &self.sheets[idx])
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// Append a sheet; fails if the name is already taken
    pub fn add_sheet(&mut self, sheet: Sheet) -> DashboardResult<&mut Sheet> {
        if self.position(&sheet.name).is_some() {
            return Err(DashboardError::MalformedInput(format!(
                "Duplicate sheet name '{}'",
                sheet.name
            )));
        }
        self.sheets.push(sheet);
        let last = self.sheets.len() - 1;
        Ok(&mut self.sheets[last])
    }
}
