//! Dashboard builder
//!
//! Takes a Jira ticket export, renames its first sheet to [`DATA_SHEET`] so
//! generated formulas have a stable target, and (re)creates the
//! [`DASHBOARD_SHEET`] summary with four live formulas:
//!
//! | Row | Label                | Formula (en)                           |
//! |-----|----------------------|----------------------------------------|
//! | 3   | Total Tickets        | `=COUNTA(Base_Dados!A:A)-1`            |
//! | 4   | Tickets Out of SLA   | `=COUNTIF(Base_Dados!G:G,"Fora do SLA")` |
//! | 5   | % Out of SLA         | `=IF(B3=0,0,B4/B3)` shown as `0.00%`   |
//! | 6   | Average Delay Days   | `=AVERAGE(Base_Dados!F:F)`             |
//!
//! The summary sheet is rebuilt from scratch on every run, so repeated runs
//! over the same file never accumulate stale rows. Nothing else in the input
//! package is rewritten.

use crate::error::{DashboardError, DashboardResult};
use crate::excel::WorkbookEditor;
use crate::formula::FormulaBuilder;
use crate::locale::LocaleProfile;
use crate::types::{CellRef, Sheet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Canonical name given to the first (data) sheet
pub const DATA_SHEET: &str = "Base_Dados";
/// Name of the generated summary sheet
pub const DASHBOARD_SHEET: &str = "Dashboard";
/// Output file used when none is given
pub const DEFAULT_OUTPUT: &str = "Dashboard_Chamados_Jira.xlsx";
/// SLA status text counted as a breach
pub const OUT_OF_SLA_STATUS: &str = "Fora do SLA";

/// Data sheet column holding the ticket id (A)
pub const TICKET_ID_COL: u16 = 0;
/// Data sheet column holding the delay in days (F)
pub const DELAY_DAYS_COL: u16 = 5;
/// Data sheet column holding the SLA status text (G)
pub const SLA_STATUS_COL: u16 = 6;

/// Width applied to the label and value columns
pub const COLUMN_WIDTH: f64 = 40.0;
/// Display format of the ratio cell
pub const PERCENT_FORMAT: &str = "0.00%";

pub const TITLE_CELL: CellRef = CellRef::new(0, 0);
pub const TOTAL_CELL: CellRef = CellRef::new(2, 1);
pub const OUT_OF_SLA_CELL: CellRef = CellRef::new(3, 1);
pub const RATIO_CELL: CellRef = CellRef::new(4, 1);
pub const AVG_DELAY_CELL: CellRef = CellRef::new(5, 1);

/// Value cells in row order, each labelled in column A of the same row
pub const METRIC_CELLS: [CellRef; 4] = [TOTAL_CELL, OUT_OF_SLA_CELL, RATIO_CELL, AVG_DELAY_CELL];

/// Build the dashboard workbook and return the path it was written to
///
/// The input package is edited in place: apart from the renamed first sheet
/// and the replaced summary sheet, styles, widths, merged ranges and any
/// other sheets are saved back untouched. Fails with
/// [`DashboardError::InputNotFound`] before anything is written when `input`
/// does not exist. An existing `output` is overwritten.
pub fn build_dashboard<P, Q>(input: P, output: Q, locale: &str) -> DashboardResult<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    let profile = LocaleProfile::resolve(locale);
    info!(input = %input.display(), output = %output.display(), locale = profile.code, "building dashboard");

    let mut editor = WorkbookEditor::open(input)?;
    apply_dashboard(&mut editor, profile)?;
    editor.save(output)?;

    Ok(output.to_path_buf())
}

/// Rename the data sheet and replace the summary sheet
pub fn apply_dashboard(
    editor: &mut WorkbookEditor,
    profile: &'static LocaleProfile,
) -> DashboardResult<()> {
    let original = editor
        .sheet_names()
        .into_iter()
        .next()
        .ok_or_else(|| DashboardError::MalformedInput("Workbook has no sheets".to_string()))?;

    editor.rename_sheet(0, DATA_SHEET)?;
    debug!(from = %original, to = DATA_SHEET, "renamed data sheet");

    if editor.remove_sheet(DASHBOARD_SHEET)? {
        debug!("removed existing {} sheet", DASHBOARD_SHEET);
    }

    editor.add_sheet(&dashboard_sheet(profile))
}

/// Lay out a fresh summary sheet for `profile`
pub fn dashboard_sheet(profile: &'static LocaleProfile) -> Sheet {
    let formulas = FormulaBuilder::new(profile, DATA_SHEET);
    let labels = &profile.labels;
    let mut sheet = Sheet::new(DASHBOARD_SHEET);

    sheet.set_text(TITLE_CELL, labels.title).style.bold = true;

    let rows = [
        (labels.total, formulas.count_rows(TICKET_ID_COL)),
        (
            labels.out_of_sla,
            formulas.count_matching(SLA_STATUS_COL, OUT_OF_SLA_STATUS),
        ),
        (
            labels.out_of_sla_pct,
            formulas.ratio(OUT_OF_SLA_CELL, TOTAL_CELL),
        ),
        (labels.avg_delay, formulas.average(DELAY_DAYS_COL)),
    ];

    for (value_cell, (label, formula)) in METRIC_CELLS.into_iter().zip(rows) {
        sheet
            .set_text(CellRef::new(value_cell.row, 0), label)
            .style
            .bold = true;
        sheet.set_formula(value_cell, formula);
    }

    if let Some(ratio) = sheet.get_mut(RATIO_CELL) {
        ratio.style.number_format = Some(PERCENT_FORMAT.to_string());
    }

    sheet.set_column_width(0, COLUMN_WIDTH);
    sheet.set_column_width(1, COLUMN_WIDTH);
    sheet
}
