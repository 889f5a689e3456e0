use strsim::normalized_levenshtein;

/// Token-sort similarity between two normalized names, 0-100.
///
/// Both strings are split on whitespace, tokens sorted lexicographically
/// and rejoined before the edit-distance ratio, so word order never
/// matters: "smith john" and "john smith" score 100. This tolerates the
/// name-order variation and transliteration drift common in elector rolls.
///
/// An empty operand always scores 0; the empty string is never a wildcard.
pub fn similarity_score(a: &str, b: &str) -> u32 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let a = token_sort(a);
    let b = token_sort(b);
    (normalized_levenshtein(&a, &b) * 100.0).round() as u32
}

fn token_sort(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
