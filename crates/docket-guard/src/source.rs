//! Case-insensitive membership index over the source document

use docket_domain::ExtractedCitation;
use std::collections::HashSet;

/// Ground truth for citation reconciliation: the lowercased source text
/// plus membership sets built from the deterministic extractor's output.
///
/// A citation is supported when it appears verbatim (case-insensitive
/// substring) in the source text OR in the extractor's membership set. The
/// extractor set admits citations whose surrounding formatting differs from
/// the argument's phrasing; the substring rule admits citations the
/// extractor's patterns missed but that genuinely occur in the text.
#[derive(Debug, Clone)]
pub struct SourceIndex {
    text: String,
    case_names: HashSet<String>,
    statutes: HashSet<String>,
}

impl SourceIndex {
    /// Build an index from the raw motion text and the extraction set
    pub fn build(motion_text: &str, extracted: &[ExtractedCitation]) -> Self {
        let mut case_names = HashSet::new();
        let mut statutes = HashSet::new();

        for record in extracted {
            match record {
                ExtractedCitation::Case(case) => {
                    case_names.insert(case.case_name.to_lowercase());
                }
                ExtractedCitation::Statute(statute) => {
                    statutes.insert(statute.full_citation.to_lowercase());
                }
            }
        }

        Self {
            text: motion_text.to_lowercase(),
            case_names,
            statutes,
        }
    }

    /// Whether the given case name is verifiable against the source
    pub fn supports_case(&self, case_name: &str) -> bool {
        let needle = case_name.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.text.contains(&needle) || self.case_names.contains(&needle)
    }

    /// Whether the given statute citation is verifiable against the source
    pub fn supports_statute(&self, citation: &str) -> bool {
        let needle = citation.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.text.contains(&needle) || self.statutes.contains(&needle)
    }

    /// Whether the source text contains the phrase, case-insensitively
    pub fn mentions(&self, phrase: &str) -> bool {
        self.text.contains(&phrase.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_domain::CaseCitation;

    fn index() -> SourceIndex {
        let extracted = vec![ExtractedCitation::Case(CaseCitation {
            full_citation: "Smith v. Jones, 123 F.3d 456 (9th Cir. 2020)".to_string(),
            case_name: "Smith v. Jones".to_string(),
            volume: 123,
            reporter: "F.3d".to_string(),
            page: 456,
            court: "9th Cir.".to_string(),
            year: Some(2020),
        })];
        SourceIndex::build(
            "Defendant relies on Smith v. Jones, 123 F.3d 456 (9th Cir. 2020).",
            &extracted,
        )
    }

    #[test]
    fn supports_case_from_text_and_set() {
        let index = index();
        assert!(index.supports_case("Smith v. Jones"));
        assert!(index.supports_case("SMITH V. JONES"));
        assert!(!index.supports_case("Doe v. Roe"));
        assert!(!index.supports_case(""));
    }

    #[test]
    fn extractor_set_alone_is_sufficient() {
        // The set admits a case name even when the index text omits it.
        let extracted = vec![ExtractedCitation::Case(CaseCitation {
            full_citation: "Doe v. Roe, 1 U.S. 2 (1990)".to_string(),
            case_name: "Doe v. Roe".to_string(),
            volume: 1,
            reporter: "U.S.".to_string(),
            page: 2,
            court: "Unknown".to_string(),
            year: Some(1990),
        })];
        let index = SourceIndex::build("unrelated text", &extracted);
        assert!(index.supports_case("doe v. roe"));
    }

    #[test]
    fn statute_membership() {
        let index = SourceIndex::build("Claims under 42 U.S.C. § 1983 fail.", &[]);
        assert!(index.supports_statute("42 u.s.c. § 1983"));
        assert!(!index.supports_statute("18 U.S.C. § 1961"));
    }

    #[test]
    fn mentions_is_case_insensitive() {
        let index = SourceIndex::build("The claim is TIME-BARRED.", &[]);
        assert!(index.mentions("time-barred"));
        assert!(!index.mentions("standing"));
    }
}
