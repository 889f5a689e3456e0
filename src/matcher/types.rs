/// Which directed search produced the winning score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    EnglishEnglish,
    EnglishVernacular,
    VernacularVernacular,
    VernacularEnglish,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::EnglishEnglish => write!(f, "English-English"),
            MatchType::EnglishVernacular => write!(f, "English-Vernacular"),
            MatchType::VernacularVernacular => write!(f, "Vernacular-Vernacular"),
            MatchType::VernacularEnglish => write!(f, "Vernacular-English"),
        }
    }
}

/// Label for a matched pair: a detected primary-key value, or a 1-based
/// sequential counter when no primary key exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateId {
    Key(String),
    Serial(u32),
}

impl std::fmt::Display for DuplicateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicateId::Key(k) => write!(f, "{}", k),
            DuplicateId::Serial(n) => write!(f, "{}", n),
        }
    }
}

/// One qualifying 2025 record paired with its best 2002 counterpart.
#[derive(Debug, Clone)]
pub struct DuplicateMatch {
    pub duplicate_id: DuplicateId,
    pub index_2025: usize,
    pub english_2025: String,
    pub vernacular_2025: String,
    pub index_2002: usize,
    pub english_2002: String,
    pub vernacular_2002: String,
    pub similarity_score: u32,
    pub match_type: MatchType,
    pub is_exact_match: bool,
}

/// Per-run counters, updated exactly once per processed 2025 record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub total_2025: usize,
    pub total_2002: usize,
    pub exact_matches: usize,
    pub fuzzy_matches: usize,
    pub no_matches: usize,
}

/// Everything a comparison run produces.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub matches: Vec<DuplicateMatch>,
    pub stats: MatchStats,
    pub primary_key: Option<String>,
}

/// Per-run progress collaborator injected into the orchestrator.
///
/// Implementations must be `Sync`: record callbacks arrive from the
/// parallel outer loop.
pub trait Reporter: Sync {
    fn begin(&self, _total: usize) {}
    fn record_done(&self) {}
    fn finish(&self) {}
}

/// Reporter that discards all progress, for library use and tests.
pub struct NoopReporter;

impl Reporter for NoopReporter {}
