//! Sample ticket export used for demos and tests

use crate::error::DashboardResult;
use crate::excel::write_workbook;
use crate::types::{CellRef, Sheet, Workbook};
use std::path::{Path, PathBuf};

/// File name used by `jira-dashboard sample` when no path is given
pub const DEFAULT_SAMPLE: &str = "test_chamados.xlsx";

/// Name of the sample's only sheet
pub const SAMPLE_SHEET: &str = "Chamados";

const ROWS: [(&str, f64, &str); 5] = [
    ("P1", 2.0, "Dentro do SLA"),
    ("P2", 0.0, "Fora do SLA"),
    ("P3", 1.0, "Fora do SLA"),
    ("P4", 3.0, "Dentro do SLA"),
    ("P5", 5.0, "Fora do SLA"),
];

/// Five tickets, three of them out of SLA, delays `[2, 0, 1, 3, 5]`
pub fn sample_workbook() -> Workbook {
    let mut sheet = Sheet::new(SAMPLE_SHEET);
    sheet.set_text(CellRef::new(0, 0), "Pedido");
    sheet.set_text(CellRef::new(0, 5), "Dias em Atraso");
    sheet.set_text(CellRef::new(0, 6), "SLA");

    for (i, (ticket, delay, sla)) in ROWS.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.set_text(CellRef::new(row, 0), *ticket);
        sheet.set_number(CellRef::new(row, 5), *delay);
        sheet.set_text(CellRef::new(row, 6), *sla);
    }

    Workbook::with_sheet(sheet)
}

/// Write [`sample_workbook`] to `path`
pub fn write_sample_workbook<P: AsRef<Path>>(path: P) -> DashboardResult<PathBuf> {
    write_workbook(&sample_workbook(), path.as_ref())?;
    Ok(path.as_ref().to_path_buf())
}
