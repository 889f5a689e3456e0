/// Canonicalize a raw name cell for comparison.
///
/// Missing cell becomes the empty string; otherwise the value is trimmed,
/// lower-cased and internal whitespace runs collapse to single spaces.
/// Total function, no error path, and idempotent.
pub fn normalize_name(raw: Option<&str>) -> String {
    match raw {
        None => String::new(),
        Some(s) => s
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_missing() {
        assert_eq!(normalize_name(None), "");
    }

    #[test]
    fn test_normalize_trims_and_folds() {
        assert_eq!(normalize_name(Some("  John   SMITH  ")), "john smith");
    }

    #[test]
    fn test_normalize_whitespace_only() {
        assert_eq!(normalize_name(Some("   \t ")), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize_name(Some("  RAMA  Rao "));
        assert_eq!(normalize_name(Some(&once)), once);
    }

    #[test]
    fn test_normalize_keeps_vernacular_text() {
        assert_eq!(normalize_name(Some(" రామా రావు ")), "రామా రావు");
    }
}
