//! Workbook ingestion
//!
//! Reads the two snapshot sheets from an Excel file and turns them into
//! in-memory [`Snapshot`]s. All input errors (missing file, missing sheet,
//! missing column) surface here; no partial state escapes a failed load.

pub mod types;

pub use types::{Record, Snapshot, COL_ENGLISH, COL_VERNACULAR, SHEET_2002, SHEET_2025};

use crate::error::{ElectorError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use log::{debug, info};
use std::path::Path;

/// Load both snapshot sheets from `path`.
pub fn load_workbook(path: &Path) -> Result<(Snapshot, Snapshot)> {
    if !path.exists() {
        return Err(ElectorError::FileNotFound(path.display().to_string()));
    }

    info!("Loading Excel file: {}", path.display());
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ElectorError::WorkbookRead(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_owned();
    debug!("Available sheets: {:?}", sheet_names);
    for required in [SHEET_2025, SHEET_2002] {
        if !sheet_names.iter().any(|s| s == required) {
            return Err(ElectorError::MissingSheet(required.to_string()));
        }
    }

    let range_2025 = workbook
        .worksheet_range(SHEET_2025)
        .map_err(|e| ElectorError::WorkbookRead(e.to_string()))?;
    let range_2002 = workbook
        .worksheet_range(SHEET_2002)
        .map_err(|e| ElectorError::WorkbookRead(e.to_string()))?;

    let snapshot_2025 = snapshot_from_range(SHEET_2025, &range_2025)?;
    let snapshot_2002 = snapshot_from_range(SHEET_2002, &range_2002)?;

    info!(
        "Loaded {}: {} rows, {}: {} rows (after cleaning)",
        SHEET_2025,
        snapshot_2025.len(),
        SHEET_2002,
        snapshot_2002.len()
    );

    Ok((snapshot_2025, snapshot_2002))
}

fn snapshot_from_range(name: &str, range: &Range<Data>) -> Result<Snapshot> {
    let mut rows = range.rows();

    // First row is the header; column names are taken verbatim.
    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|c| cell_to_string(c).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let raw_rows: Vec<Vec<Option<String>>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Snapshot::new(name, columns, raw_rows)
}

/// Stringify a cell, keeping missing (`Empty`/`Error`) as `None`.
///
/// Integral floats lose the trailing `.0` so numeric serial numbers and
/// EPIC numbers read back as clean identifiers.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_float(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format_float(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
