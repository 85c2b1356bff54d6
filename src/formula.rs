//! Formula text generation for the dashboard sheet
//!
//! Formulas are emitted as plain text in the target locale's syntax and are
//! evaluated by whatever spreadsheet application opens the file (and by
//! `evaluator` for previews).

use crate::locale::LocaleProfile;
use crate::types::{column_index_to_letter, CellRef};

/// Build `numer / denom` guarded against a zero denominator
///
/// Example (`en`): `safe_division_formula("B4", "B3", "en")` →
/// `=IF(B3=0,0,B4/B3)`; with `pt` → `=SE(B3=0;0;B4/B3)`.
pub fn safe_division_formula(numer_cell: &str, denom_cell: &str, locale: &str) -> String {
    safe_division(LocaleProfile::resolve(locale), numer_cell, denom_cell)
}

fn safe_division(profile: &LocaleProfile, numer: &str, denom: &str) -> String {
    let sep = profile.arg_separator;
    format!(
        "={}({denom}=0{sep}0{sep}{numer}/{denom})",
        profile.if_fn
    )
}

/// Generates aggregate formulas over whole columns of one data sheet
pub struct FormulaBuilder {
    profile: &'static LocaleProfile,
    sheet_prefix: String,
}

impl FormulaBuilder {
    pub fn new(profile: &'static LocaleProfile, data_sheet: &str) -> Self {
        Self {
            profile,
            sheet_prefix: sheet_prefix(data_sheet),
        }
    }

    /// `Sheet!A:A`
    pub fn column_range(&self, col: u16) -> String {
        let letter = column_index_to_letter(col);
        format!("{}{letter}:{letter}", self.sheet_prefix)
    }

    /// Non-empty cells in `col`, not counting the header row
    pub fn count_rows(&self, col: u16) -> String {
        format!("={}({})-1", self.profile.count_fn, self.column_range(col))
    }

    /// Cells in `col` equal to `criterion`
    pub fn count_matching(&self, col: u16, criterion: &str) -> String {
        format!(
            "={}({}{}\"{}\")",
            self.profile.countif_fn,
            self.column_range(col),
            self.profile.arg_separator,
            criterion.replace('"', "\"\"")
        )
    }

    /// Mean of the numeric cells in `col`
    pub fn average(&self, col: u16) -> String {
        format!("={}({})", self.profile.avg_fn, self.column_range(col))
    }

    /// Zero-guarded ratio between two cells of the sheet being written
    pub fn ratio(&self, numer: CellRef, denom: CellRef) -> String {
        safe_division(self.profile, &numer.to_string(), &denom.to_string())
    }
}

/// Sheet qualifier for a reference, quoted when the name needs it
fn sheet_prefix(name: &str) -> String {
    let plain = name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        && !name.starts_with(|c: char| c.is_ascii_digit());

    if plain {
        format!("{}!", name)
    } else {
        format!("'{}'!", name.replace('\'', "''"))
    }
}
