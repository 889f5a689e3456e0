//! Matching engine
//!
//! Drives the cross-snapshot comparison: every 2025 record runs four
//! directed best-match searches against the 2002 pools (English-English,
//! English-Vernacular, Vernacular-Vernacular, Vernacular-English), the
//! single best result is thresholded and recorded.
//!
//! ## Flow
//! 1. Detect a primary-key column once, before the main loop
//! 2. Normalize the 2002 name pools once
//! 3. Evaluate each 2025 record independently (parallel outer loop)
//! 4. Fold outcomes in input order into matches and statistics

pub mod normalize;
pub mod primary_key;
pub mod search;
pub mod similarity;
pub mod types;

pub use normalize::normalize_name;
pub use primary_key::detect_primary_key;
pub use search::find_best_match;
pub use similarity::similarity_score;
pub use types::{
    ComparisonOutcome, DuplicateId, DuplicateMatch, MatchStats, MatchType, NoopReporter, Reporter,
};

use crate::loader::{Record, Snapshot};
use log::{info, warn};
use rayon::prelude::*;

/// Default inclusive similarity threshold.
pub const DEFAULT_THRESHOLD: u32 = 85;

/// Clamp a requested threshold into 0-100, falling back to the default.
pub fn clamp_threshold(value: i64) -> u32 {
    if (0..=100).contains(&value) {
        value as u32
    } else {
        warn!("Threshold {} outside 0-100, using default {}", value, DEFAULT_THRESHOLD);
        DEFAULT_THRESHOLD
    }
}

#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Inclusive minimum score for a pair to count as a duplicate.
    pub threshold: u32,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

/// A qualifying record before duplicate-id resolution.
struct CandidateMatch {
    record_index: usize,
    english_raw: String,
    vernacular_raw: String,
    best_index: usize,
    score: u32,
    match_type: MatchType,
    key: Option<String>,
}

/// Compare every 2025 record against the 2002 pool.
///
/// Each cleaned 2025 record contributes exactly one outcome: one
/// [`DuplicateMatch`] or one `no_matches` increment. Matches come back in
/// discovery order; sequential duplicate ids count every match, so ids
/// stay aligned with discovery order even when a primary-key value fills
/// in for most records.
pub fn compare_snapshots(
    current: &Snapshot,
    reference: &Snapshot,
    options: &CompareOptions,
    reporter: &dyn Reporter,
) -> ComparisonOutcome {
    let primary_key = detect_primary_key(current, reference);
    match &primary_key {
        Some(column) => info!("Detected primary key column: '{}'", column),
        None => info!("No primary key column detected, using sequential numbering"),
    }
    let key_col = primary_key.as_deref().and_then(|c| current.column_index(c));

    // Normalize the reference pools once; the inner loop only scores.
    let reference_english: Vec<String> = reference
        .rows
        .iter()
        .map(|r| normalize_name(reference.english(r)))
        .collect();
    let reference_vernacular: Vec<String> = reference
        .rows
        .iter()
        .map(|r| normalize_name(reference.vernacular(r)))
        .collect();

    reporter.begin(current.len());

    // Outer records are independent; collect preserves input order, so the
    // parallel run is identical to the serial one.
    let outcomes: Vec<Option<CandidateMatch>> = current
        .rows
        .par_iter()
        .map(|record| {
            let outcome = evaluate_record(
                current,
                record,
                key_col,
                options.threshold,
                &reference_english,
                &reference_vernacular,
            );
            reporter.record_done();
            outcome
        })
        .collect();

    reporter.finish();

    let mut stats = MatchStats {
        total_2025: current.len(),
        total_2002: reference.len(),
        ..Default::default()
    };
    let mut matches = Vec::new();
    let mut sequential_id: u32 = 1;

    for outcome in outcomes {
        let Some(candidate) = outcome else {
            stats.no_matches += 1;
            continue;
        };

        let duplicate_id = match candidate.key {
            Some(key) => DuplicateId::Key(key),
            None => DuplicateId::Serial(sequential_id),
        };
        sequential_id += 1;

        if candidate.score == 100 {
            stats.exact_matches += 1;
        } else {
            stats.fuzzy_matches += 1;
        }

        let matched = &reference.rows[candidate.best_index];
        matches.push(DuplicateMatch {
            duplicate_id,
            index_2025: candidate.record_index,
            english_2025: candidate.english_raw,
            vernacular_2025: candidate.vernacular_raw,
            index_2002: matched.index,
            english_2002: reference.english(matched).unwrap_or_default().to_string(),
            vernacular_2002: reference.vernacular(matched).unwrap_or_default().to_string(),
            similarity_score: candidate.score,
            match_type: candidate.match_type,
            is_exact_match: candidate.score == 100,
        });
    }

    info!(
        "Found {} potential duplicates ({} exact, {} fuzzy, {} unmatched)",
        matches.len(),
        stats.exact_matches,
        stats.fuzzy_matches,
        stats.no_matches
    );

    ComparisonOutcome { matches, stats, primary_key }
}

/// Run the four directed searches for one record and apply the threshold.
///
/// Search order is fixed (Eng-Eng, Eng-Vern, Vern-Vern, Vern-Eng) and
/// replacement is strictly-greater, so the earliest search to reach the
/// best score labels the match.
fn evaluate_record(
    current: &Snapshot,
    record: &Record,
    key_col: Option<usize>,
    threshold: u32,
    reference_english: &[String],
    reference_vernacular: &[String],
) -> Option<CandidateMatch> {
    let english = normalize_name(current.english(record));
    let vernacular = normalize_name(current.vernacular(record));

    if english.is_empty() && vernacular.is_empty() {
        return None;
    }

    let searches = [
        (&english, reference_english, MatchType::EnglishEnglish),
        (&english, reference_vernacular, MatchType::EnglishVernacular),
        (&vernacular, reference_vernacular, MatchType::VernacularVernacular),
        (&vernacular, reference_english, MatchType::VernacularEnglish),
    ];

    let mut best_score = 0;
    let mut best_index = None;
    let mut best_type = MatchType::EnglishEnglish;

    for (query, pool, match_type) in searches {
        if query.is_empty() {
            continue;
        }
        let (index, score) = find_best_match(query, pool);
        if score > best_score {
            best_score = score;
            best_index = index;
            best_type = match_type;
        }
    }

    let best_index = best_index?;
    if best_score < threshold {
        return None;
    }

    let key = key_col
        .and_then(|c| record.cell(c))
        .map(|v| v.trim().to_string());

    Some(CandidateMatch {
        record_index: record.index,
        english_raw: current.english(record).unwrap_or_default().to_string(),
        vernacular_raw: current.vernacular(record).unwrap_or_default().to_string(),
        best_index,
        score: best_score,
        match_type: best_type,
        key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{COL_ENGLISH, COL_VERNACULAR, SHEET_2002, SHEET_2025};

    fn name_snapshot(sheet: &str, names: &[(&str, &str)]) -> Snapshot {
        let columns = vec![COL_ENGLISH.to_string(), COL_VERNACULAR.to_string()];
        let rows = names
            .iter()
            .map(|(e, v)| {
                vec![
                    if e.is_empty() { Some(String::new()) } else { Some(e.to_string()) },
                    if v.is_empty() { Some(String::new()) } else { Some(v.to_string()) },
                ]
            })
            .collect();
        Snapshot::new(sheet, columns, rows).unwrap()
    }

    fn run(
        current: &[(&str, &str)],
        reference: &[(&str, &str)],
        threshold: u32,
    ) -> ComparisonOutcome {
        let current = name_snapshot(SHEET_2025, current);
        let reference = name_snapshot(SHEET_2002, reference);
        compare_snapshots(&current, &reference, &CompareOptions { threshold }, &NoopReporter)
    }

    #[test]
    fn test_reordered_name_is_exact_english_match() {
        let outcome = run(&[("John Smith", "")], &[("Smith John", "")], 85);
        assert_eq!(outcome.matches.len(), 1);
        let m = &outcome.matches[0];
        assert_eq!(m.similarity_score, 100);
        assert_eq!(m.match_type, MatchType::EnglishEnglish);
        assert!(m.is_exact_match);
        assert_eq!(outcome.stats.exact_matches, 1);
        assert_eq!(outcome.stats.no_matches, 0);
    }

    #[test]
    fn test_empty_record_counts_as_no_match() {
        let outcome = run(&[("", "")], &[("Smith John", "")], 85);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.stats.no_matches, 1);
    }

    #[test]
    fn test_threshold_is_inclusive_lower_bound() {
        // "venkata ramana" vs "venkata ramXna": one substitution in 14
        // chars, sorted tokens unchanged.
        let score = similarity_score("venkata ramana", "venkata ramxna");
        let at = run(&[("Venkata Ramana", "")], &[("Venkata RamXna", "")], score);
        assert_eq!(at.matches.len(), 1);
        assert_eq!(at.stats.fuzzy_matches, 1);

        let above = run(&[("Venkata Ramana", "")], &[("Venkata RamXna", "")], score + 1);
        assert!(above.matches.is_empty());
        assert_eq!(above.stats.no_matches, 1);
    }

    #[test]
    fn test_vernacular_only_record_matches_vernacular_pool() {
        let outcome = run(&[("", "రామా రావు")], &[("", "రామా రావు")], 85);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].match_type, MatchType::VernacularVernacular);
    }

    #[test]
    fn test_cross_script_transliteration_direction() {
        // English query matching the 2002 vernacular column.
        let outcome = run(&[("rama rao", "")], &[("somebody else", "rama rao")], 85);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].match_type, MatchType::EnglishVernacular);
    }

    #[test]
    fn test_tie_prefers_earlier_search_direction() {
        // Both English and vernacular 2002 columns hold an exact copy; the
        // English-English search runs first and keeps the tie.
        let outcome = run(&[("rama rao", "")], &[("rama rao", "rama rao")], 85);
        assert_eq!(outcome.matches[0].match_type, MatchType::EnglishEnglish);
    }

    #[test]
    fn test_total_accounting_invariant() {
        let outcome = run(
            &[
                ("John Smith", ""),
                ("", ""),
                ("Completely Different", ""),
                ("Padma Lakshmi", ""),
            ],
            &[("Smith John", ""), ("Padma Lakshmi", "")],
            85,
        );
        let s = &outcome.stats;
        assert_eq!(s.exact_matches + s.fuzzy_matches + s.no_matches, s.total_2025);
        assert_eq!(outcome.matches.len(), s.exact_matches + s.fuzzy_matches);
    }

    #[test]
    fn test_sequential_ids_follow_discovery_order() {
        let outcome = run(
            &[("John Smith", ""), ("Padma Lakshmi", "")],
            &[("John Smith", ""), ("Padma Lakshmi", "")],
            85,
        );
        assert_eq!(outcome.matches[0].duplicate_id, DuplicateId::Serial(1));
        assert_eq!(outcome.matches[1].duplicate_id, DuplicateId::Serial(2));
    }

    #[test]
    fn test_primary_key_value_used_as_duplicate_id() {
        let names = [
            "John Smith",
            "Padma Lakshmi",
            "Ravi Kumar",
            "Asha Devi",
            "Vikram Singh",
            "Meena Iyer",
        ];
        let columns = vec![
            COL_ENGLISH.to_string(),
            COL_VERNACULAR.to_string(),
            "EPIC No".to_string(),
        ];
        // Second record lacks a key; 5 of 6 present clears the 80% bar.
        let current_rows = names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let key = if i == 1 { None } else { Some(format!(" K{} ", i)) };
                vec![Some(n.to_string()), None, key]
            })
            .collect();
        let reference_rows = names
            .iter()
            .map(|n| vec![Some(n.to_string()), None, Some("OLD".into())])
            .collect();
        let current = Snapshot::new(SHEET_2025, columns.clone(), current_rows).unwrap();
        let reference = Snapshot::new(SHEET_2002, columns, reference_rows).unwrap();

        let outcome =
            compare_snapshots(&current, &reference, &CompareOptions::default(), &NoopReporter);
        assert_eq!(outcome.primary_key.as_deref(), Some("EPIC No"));
        // Key values are trimmed; the record with a missing key falls back
        // to the running counter, which counts every match so far.
        assert_eq!(outcome.matches[0].duplicate_id, DuplicateId::Key("K0".into()));
        assert_eq!(outcome.matches[1].duplicate_id, DuplicateId::Serial(2));
        assert_eq!(outcome.matches[2].duplicate_id, DuplicateId::Key("K2".into()));
    }

    #[test]
    fn test_clamp_threshold() {
        assert_eq!(clamp_threshold(90), 90);
        assert_eq!(clamp_threshold(0), 0);
        assert_eq!(clamp_threshold(100), 100);
        assert_eq!(clamp_threshold(-1), DEFAULT_THRESHOLD);
        assert_eq!(clamp_threshold(101), DEFAULT_THRESHOLD);
    }
}
