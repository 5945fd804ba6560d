//! Pattern-based implementation of the `CitationExtractor` trait

use crate::config::ExtractionConfig;
use crate::patterns::{self, PatternKind};
use docket_domain::traits::CitationExtractor;
use docket_domain::{CaseCitation, ExtractedCitation, StatuteCitation};
use regex::Captures;
use tracing::debug;

/// Regex-driven citation extractor.
///
/// Applies the fixed pattern table over the full text and constructs a
/// record per match. Matches whose numeric fields fail to parse are dropped
/// without aborting extraction.
pub struct PatternExtractor {
    config: ExtractionConfig,
}

impl PatternExtractor {
    /// Create an extractor with the given configuration
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Create an extractor with a specific citation cap
    pub fn with_cap(max_citations: usize) -> Self {
        Self::new(ExtractionConfig { max_citations })
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl CitationExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> Vec<ExtractedCitation> {
        let mut records = Vec::new();

        'patterns: for (kind, regex) in patterns::all() {
            for caps in regex.captures_iter(text) {
                if records.len() >= self.config.max_citations {
                    debug!(
                        cap = self.config.max_citations,
                        "citation cap reached, stopping extraction"
                    );
                    break 'patterns;
                }
                match build_record(*kind, &caps) {
                    Some(record) => records.push(record),
                    None => {
                        debug!(matched = caps.get(0).map(|m| m.as_str()).unwrap_or(""),
                            "dropping citation match with unparseable numeric field");
                    }
                }
            }
        }

        records
    }
}

/// Construct a record from a pattern match. Returns `None` when a numeric
/// capture fails to parse.
fn build_record(kind: PatternKind, caps: &Captures<'_>) -> Option<ExtractedCitation> {
    let full_citation = caps.get(0)?.as_str().trim().to_string();

    match kind {
        PatternKind::FederalCase | PatternKind::StateCase => {
            let plaintiff = caps.name("plaintiff")?.as_str().trim();
            let defendant = caps.name("defendant")?.as_str().trim();
            let volume: u32 = caps.name("volume")?.as_str().parse().ok()?;
            let page: u32 = caps.name("page")?.as_str().parse().ok()?;
            let year = match caps.name("year") {
                Some(year) => Some(year.as_str().parse::<u16>().ok()?),
                None => None,
            };
            let court = caps
                .name("court")
                .map(|c| c.as_str().trim())
                .filter(|c| !c.is_empty())
                .unwrap_or("Unknown")
                .to_string();

            Some(ExtractedCitation::Case(CaseCitation {
                full_citation,
                case_name: format!("{} v. {}", plaintiff, defendant),
                volume,
                reporter: caps.name("reporter")?.as_str().trim().to_string(),
                page,
                court,
                year,
            }))
        }
        PatternKind::Statute => {
            let title: u16 = caps.name("title")?.as_str().parse().ok()?;
            Some(ExtractedCitation::Statute(StatuteCitation {
                full_citation,
                title,
                code: caps.name("code")?.as_str().to_string(),
                section: caps.name("section")?.as_str().to_string(),
            }))
        }
    }
}
