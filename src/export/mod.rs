//! Result assembly and persistence
//!
//! Orders the discovered matches for presentation and writes the final
//! two-sheet Excel report (Summary + Duplicates).

pub mod excel;

use crate::error::Result;
use crate::matcher::{ComparisonOutcome, DuplicateId, DuplicateMatch};
use chrono::Local;
use log::info;
use std::path::{Path, PathBuf};

/// Sort matches by similarity score, descending.
///
/// The sort is stable, so discovery order is preserved between equal
/// scores. When no primary key was detected every duplicate id is
/// overwritten with its 1-based position in the final order; detected
/// primary-key values are left untouched.
pub fn assemble(matches: &mut [DuplicateMatch], primary_key_detected: bool) {
    matches.sort_by(|a, b| b.similarity_score.cmp(&a.similarity_score));

    if !primary_key_detected {
        for (position, m) in matches.iter_mut().enumerate() {
            m.duplicate_id = DuplicateId::Serial(position as u32 + 1);
        }
    }
}

/// Default report path: next to the input, stem suffixed with
/// `_duplicates_<timestamp>`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("electors");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    input.with_file_name(format!("{}_duplicates_{}.xlsx", stem, timestamp))
}

/// Assemble the outcome in place and write the report to `output_path`.
pub fn export_results(
    outcome: &mut ComparisonOutcome,
    threshold: u32,
    output_path: &Path,
) -> Result<()> {
    assemble(&mut outcome.matches, outcome.primary_key.is_some());
    excel::write_report(output_path, &outcome.matches, &outcome.stats, threshold)?;
    info!("Results exported to: {}", output_path.display());
    Ok(())
}
