use crate::loader::Snapshot;
use log::debug;

/// Identifier patterns checked against case-folded column names, in
/// priority order. A column matches on equality or suffix.
const PRIMARY_KEY_PATTERNS: &[&str] = &[
    "id",
    "serial number",
    "s.no",
    "s.no.",
    "sno",
    "sl no",
    "slno",
    "elector id",
    "voter id",
    "epic no",
    "epic",
];

/// Detect a per-record identifier column usable across both snapshots.
///
/// Columns of the 2025 snapshot are scanned in declared order; the first
/// one whose folded name matches a pattern, exists in the 2002 snapshot
/// and is more than 80% non-missing in the 2025 snapshot wins. `None`
/// means downstream consumers fall back to sequential numbering.
pub fn detect_primary_key(current: &Snapshot, reference: &Snapshot) -> Option<String> {
    for column in current.columns() {
        let folded = column.trim().to_lowercase();
        let pattern_hit = PRIMARY_KEY_PATTERNS
            .iter()
            .any(|p| folded == *p || folded.ends_with(p));
        if !pattern_hit {
            continue;
        }

        if reference.column_index(column).is_none() {
            debug!("Primary key candidate '{}' missing from {}", column, reference.name());
            continue;
        }

        let col_idx = current.column_index(column)?;
        let non_missing = current.non_missing_count(col_idx);
        if non_missing as f64 > current.len() as f64 * 0.8 {
            return Some(column.clone());
        }
        debug!(
            "Primary key candidate '{}' rejected: {}/{} non-missing",
            column,
            non_missing,
            current.len()
        );
    }

    None
}
