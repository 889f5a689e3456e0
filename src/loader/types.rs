use crate::error::{ElectorError, Result};
use std::collections::HashMap;

/// Sheet holding the current electoral roll.
pub const SHEET_2025: &str = "2025_LIST";
/// Sheet holding the historical electoral roll.
pub const SHEET_2002: &str = "2002_LIST";
/// Latin-script name column, required in both sheets.
pub const COL_ENGLISH: &str = "Elector's Name";
/// Local-script name column, required in both sheets.
pub const COL_VERNACULAR: &str = "Elector's Name(Vernacular)";

/// One row of a snapshot.
///
/// `index` is the positional index within the sheet, assigned before
/// empty-row cleaning so exported indices line up with the source file.
/// A missing cell (`None`) is distinct from a present-but-empty string.
#[derive(Debug, Clone)]
pub struct Record {
    pub index: usize,
    cells: Vec<Option<String>>,
}

impl Record {
    pub fn new(index: usize, cells: Vec<Option<String>>) -> Self {
        Self { index, cells }
    }

    /// Cell value at `col`, `None` when missing or out of range.
    pub fn cell(&self, col: usize) -> Option<&str> {
        self.cells.get(col).and_then(|c| c.as_deref())
    }
}

/// An ordered, immutable set of elector records from one sheet.
#[derive(Debug, Clone)]
pub struct Snapshot {
    name: String,
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    english_col: usize,
    vernacular_col: usize,
    pub rows: Vec<Record>,
}

impl Snapshot {
    /// Build a snapshot from a header and raw cell rows.
    ///
    /// Rows where both name cells are missing are dropped here; rows with
    /// present-but-empty names survive and are counted during comparison.
    /// Fails when either required name column is absent.
    pub fn new(name: &str, columns: Vec<String>, raw_rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let column_index: HashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        let required_col = |col: &str| -> Result<usize> {
            column_index.get(col).copied().ok_or_else(|| ElectorError::MissingColumn {
                column: col.to_string(),
                sheet: name.to_string(),
            })
        };
        let english_col = required_col(COL_ENGLISH)?;
        let vernacular_col = required_col(COL_VERNACULAR)?;

        let rows: Vec<Record> = raw_rows
            .into_iter()
            .enumerate()
            .map(|(index, cells)| Record::new(index, cells))
            .filter(|r| r.cell(english_col).is_some() || r.cell(vernacular_col).is_some())
            .collect();

        Ok(Self {
            name: name.to_string(),
            columns,
            column_index,
            english_col,
            vernacular_col,
            rows,
        })
    }

    /// Sheet name this snapshot was loaded from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }

    pub fn english<'a>(&self, record: &'a Record) -> Option<&'a str> {
        record.cell(self.english_col)
    }

    pub fn vernacular<'a>(&self, record: &'a Record) -> Option<&'a str> {
        record.cell(self.vernacular_col)
    }

    /// Number of rows remaining after empty-row cleaning.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count of rows with a non-missing value in `col`.
    pub fn non_missing_count(&self, col: usize) -> usize {
        self.rows.iter().filter(|r| r.cell(col).is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        vec![COL_ENGLISH.to_string(), COL_VERNACULAR.to_string()]
    }

    #[test]
    fn test_drops_rows_with_both_names_missing() {
        let rows = vec![
            vec![Some("John Smith".to_string()), None],
            vec![None, None],
            vec![None, Some("జాన్".to_string())],
        ];
        let snapshot = Snapshot::new(SHEET_2025, columns(), rows).unwrap();
        assert_eq!(snapshot.len(), 2);
        // Indices are pre-cleaning positions.
        assert_eq!(snapshot.rows[0].index, 0);
        assert_eq!(snapshot.rows[1].index, 2);
    }

    #[test]
    fn test_keeps_rows_with_empty_string_names() {
        let rows = vec![vec![Some(String::new()), Some(String::new())]];
        let snapshot = Snapshot::new(SHEET_2025, columns(), rows).unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_missing_required_column() {
        let result = Snapshot::new(SHEET_2002, vec![COL_ENGLISH.to_string()], vec![]);
        assert!(matches!(
            result,
            Err(ElectorError::MissingColumn { ref column, ref sheet })
                if column == COL_VERNACULAR && sheet == SHEET_2002
        ));
    }

    #[test]
    fn test_non_missing_count() {
        let cols = vec![
            COL_ENGLISH.to_string(),
            COL_VERNACULAR.to_string(),
            "EPIC No".to_string(),
        ];
        let rows = vec![
            vec![Some("A".into()), None, Some("X1".into())],
            vec![Some("B".into()), None, None],
        ];
        let snapshot = Snapshot::new(SHEET_2025, cols, rows).unwrap();
        assert_eq!(snapshot.non_missing_count(2), 1);
    }
}
