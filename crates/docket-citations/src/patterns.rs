//! The ordered citation pattern table
//!
//! Patterns are applied in a fixed priority sequence; within one pattern,
//! matches follow document order. A single citation may match more than one
//! pattern; duplicates are tolerated because downstream reconciliation only
//! checks membership.

use once_cell::sync::Lazy;
use regex::Regex;

/// Which pattern family produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Party-v-party citation with a federal reporter (F.2d, F. Supp., U.S.)
    FederalCase,
    /// Party-v-party citation with a state reporter
    StateCase,
    /// Statutory section citation (U.S.C., C.F.R.)
    Statute,
}

// Federal cases: Smith v. Jones, 123 F.3d 456 (9th Cir. 2020)
const FEDERAL_CASE: &str = r"(?i)(?P<plaintiff>\w+(?:\s+\w+)*)\s+v\.\s+(?P<defendant>\w+(?:\s+\w+)*),?\s+(?P<volume>\d+)\s+(?P<reporter>F\.\d?d|F\.\s?Supp\.?\s?\d?d?|U\.S\.)\s+(?P<page>\d+)(?:\s*\((?P<court>[^)]*?)\s*(?P<year>\d{4})\))?";

// State cases with various reporters: Doe v. Roe, 45 Cal.App.4th 321 (1996)
const STATE_CASE: &str = r"(?i)(?P<plaintiff>\w+(?:\s+\w+)*)\s+v\.\s+(?P<defendant>\w+(?:\s+\w+)*),?\s+(?P<volume>\d+)\s+(?P<reporter>[A-Z][^,\d]*?)\s+(?P<page>\d+)(?:\s*\((?P<court>[^)]*?)\s*(?P<year>\d{4})\))?";

// Statutory sections: 42 U.S.C. § 1983, 29 C.F.R. §§ 1910.132(a)
const STATUTE: &str =
    r"(?P<title>\d+)\s+(?P<code>U\.S\.C\.(?:A\.)?|C\.F\.R\.)\s*§§?\s*(?P<section>\d[\w.\-]*(?:\([a-zA-Z0-9]+\))*)";

static PATTERNS: Lazy<Vec<(PatternKind, Regex)>> = Lazy::new(|| {
    vec![
        (
            PatternKind::FederalCase,
            Regex::new(FEDERAL_CASE).expect("federal case pattern compiles"),
        ),
        (
            PatternKind::StateCase,
            Regex::new(STATE_CASE).expect("state case pattern compiles"),
        ),
        (
            PatternKind::Statute,
            Regex::new(STATUTE).expect("statute pattern compiles"),
        ),
    ]
});

/// The pattern table, in priority order
pub(crate) fn all() -> &'static [(PatternKind, Regex)] {
    &PATTERNS
}
