use super::similarity::similarity_score;

/// Find the highest-scoring candidate for `query` in `candidates`.
///
/// Returns `(position of best candidate, score)`, or `(None, 0)` for an
/// empty query or pool. The whole pool is always scanned so the true
/// global best is found; replacement is strictly-greater, so the first
/// candidate to reach a given maximum wins ties.
pub fn find_best_match(query: &str, candidates: &[String]) -> (Option<usize>, u32) {
    if query.is_empty() || candidates.is_empty() {
        return (None, 0);
    }

    let mut best_score = 0;
    let mut best_index = None;

    for (idx, candidate) in candidates.iter().enumerate() {
        let score = similarity_score(query, candidate);
        if score > best_score {
            best_score = score;
            best_index = Some(idx);
        }
    }

    (best_index, best_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_pool() {
        assert_eq!(find_best_match("john smith", &[]), (None, 0));
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(find_best_match("", &pool(&["john smith"])), (None, 0));
    }

    #[test]
    fn test_exact_copy_wins_with_100() {
        let candidates = pool(&["padma lakshmi", "john smith", "ravi kumar"]);
        assert_eq!(find_best_match("john smith", &candidates), (Some(1), 100));
    }

    #[test]
    fn test_first_of_duplicated_exact_copies_wins() {
        let candidates = pool(&["john smith", "john smith"]);
        assert_eq!(find_best_match("john smith", &candidates), (Some(0), 100));
    }

    #[test]
    fn test_no_candidate_beats_zero_for_all_empty_pool() {
        let candidates = pool(&["", ""]);
        assert_eq!(find_best_match("john smith", &candidates), (None, 0));
    }
}
