//! Excel report generation
//!
//! Writes the Summary and Duplicates sheets with `rust_xlsxwriter`. The
//! workbook is rendered fully in memory and written in one shot, so a
//! failed render leaves no file behind.

use crate::error::{ElectorError, Result};
use crate::loader::{SHEET_2002, SHEET_2025};
use crate::matcher::{DuplicateId, DuplicateMatch, MatchStats};
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Duplicates sheet column order, fixed by the report contract.
const DUPLICATE_HEADERS: [&str; 10] = [
    "duplicate_id",
    "similarity_score",
    "match_type",
    "is_exact_match",
    "2025_english",
    "2025_vernacular",
    "2025_index",
    "2002_english",
    "2002_vernacular",
    "2002_index",
];

/// Write the two-sheet report. The Duplicates sheet is omitted when no
/// duplicates were found.
pub fn write_report(
    path: &Path,
    matches: &[DuplicateMatch],
    stats: &MatchStats,
    threshold: u32,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let summary = workbook.add_worksheet();
    summary.set_name("Summary").map_err(xlsx_err)?;
    write_summary(summary, matches.len(), stats, threshold, &header_format)?;

    if !matches.is_empty() {
        let duplicates = workbook.add_worksheet();
        duplicates.set_name("Duplicates").map_err(xlsx_err)?;
        write_duplicates(duplicates, matches, &header_format)?;
    }

    let buffer = workbook.save_to_buffer().map_err(xlsx_err)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

fn write_summary(
    sheet: &mut Worksheet,
    duplicate_count: usize,
    stats: &MatchStats,
    threshold: u32,
    header_format: &Format,
) -> Result<()> {
    sheet.write_string_with_format(0, 0, "Metric", header_format).map_err(xlsx_err)?;
    sheet.write_string_with_format(0, 1, "Value", header_format).map_err(xlsx_err)?;

    let counters = [
        (format!("Total records in {}", SHEET_2025), stats.total_2025),
        (format!("Total records in {}", SHEET_2002), stats.total_2002),
        ("Total duplicates found".to_string(), duplicate_count),
        ("Exact matches (100% similarity)".to_string(), stats.exact_matches),
        (format!("Fuzzy matches ({}-99% similarity)", threshold), stats.fuzzy_matches),
        ("No matches found".to_string(), stats.no_matches),
    ];

    let mut row: u32 = 1;
    for (metric, value) in counters {
        sheet.write_string(row, 0, metric).map_err(xlsx_err)?;
        sheet.write_number(row, 1, value as f64).map_err(xlsx_err)?;
        row += 1;
    }

    sheet.write_string(row, 0, "Similarity threshold used").map_err(xlsx_err)?;
    sheet.write_string(row, 1, format!("{}%", threshold)).map_err(xlsx_err)?;
    row += 1;

    sheet.write_string(row, 0, "Analysis date").map_err(xlsx_err)?;
    sheet
        .write_string(row, 1, Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
        .map_err(xlsx_err)?;

    Ok(())
}

fn write_duplicates(
    sheet: &mut Worksheet,
    matches: &[DuplicateMatch],
    header_format: &Format,
) -> Result<()> {
    for (col, header) in DUPLICATE_HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, header_format)
            .map_err(xlsx_err)?;
    }

    for (i, m) in matches.iter().enumerate() {
        let row = i as u32 + 1;
        match &m.duplicate_id {
            DuplicateId::Key(key) => sheet.write_string(row, 0, key.as_str()).map_err(xlsx_err)?,
            DuplicateId::Serial(n) => sheet.write_number(row, 0, *n as f64).map_err(xlsx_err)?,
        };
        sheet.write_number(row, 1, m.similarity_score as f64).map_err(xlsx_err)?;
        sheet.write_string(row, 2, m.match_type.to_string()).map_err(xlsx_err)?;
        sheet.write_boolean(row, 3, m.is_exact_match).map_err(xlsx_err)?;
        sheet.write_string(row, 4, m.english_2025.as_str()).map_err(xlsx_err)?;
        sheet.write_string(row, 5, m.vernacular_2025.as_str()).map_err(xlsx_err)?;
        sheet.write_number(row, 6, m.index_2025 as f64).map_err(xlsx_err)?;
        sheet.write_string(row, 7, m.english_2002.as_str()).map_err(xlsx_err)?;
        sheet.write_string(row, 8, m.vernacular_2002.as_str()).map_err(xlsx_err)?;
        sheet.write_number(row, 9, m.index_2002 as f64).map_err(xlsx_err)?;
    }

    Ok(())
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> ElectorError {
    ElectorError::ExcelGeneration(e.to_string())
}
