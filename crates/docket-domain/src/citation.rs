//! Citation records produced by deterministic extraction
//!
//! These types are created per analysis request, serialized into the user
//! prompt, consulted by the anti-hallucination guard, and then discarded.
//! They are never persisted.

use serde::{Deserialize, Serialize};

/// A case citation matched by a reporter pattern
/// (e.g. `Smith v. Jones, 123 F.3d 456 (9th Cir. 2020)`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseCitation {
    /// The complete matched citation text
    pub full_citation: String,
    /// Normalized case name ("Smith v. Jones")
    pub case_name: String,
    /// Reporter volume number
    pub volume: u32,
    /// Reporter abbreviation ("F.3d", "U.S.", ...)
    pub reporter: String,
    /// First page of the decision
    pub page: u32,
    /// Deciding court, "Unknown" when the parenthetical is absent
    pub court: String,
    /// Year of decision, when present in the parenthetical
    pub year: Option<u16>,
}

/// A statutory citation matched by a section pattern
/// (e.g. `42 U.S.C. § 1983`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteCitation {
    /// The complete matched citation text
    pub full_citation: String,
    /// Title number
    pub title: u16,
    /// Code abbreviation ("U.S.C.", "C.F.R.", ...)
    pub code: String,
    /// Section identifier
    pub section: String,
}

/// A single extraction record, tagged by citation kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractedCitation {
    /// Party-v-party case citation
    Case(CaseCitation),
    /// Statutory section citation
    Statute(StatuteCitation),
}

impl ExtractedCitation {
    /// The complete matched citation text
    pub fn full_citation(&self) -> &str {
        match self {
            ExtractedCitation::Case(case) => &case.full_citation,
            ExtractedCitation::Statute(statute) => &statute.full_citation,
        }
    }

    /// The case name, for case citations
    pub fn case_name(&self) -> Option<&str> {
        match self {
            ExtractedCitation::Case(case) => Some(&case.case_name),
            ExtractedCitation::Statute(_) => None,
        }
    }

    /// Whether this record is a statutory citation
    pub fn is_statute(&self) -> bool {
        matches!(self, ExtractedCitation::Statute(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_case() -> CaseCitation {
        CaseCitation {
            full_citation: "Smith v. Jones, 123 F.3d 456 (9th Cir. 2020)".to_string(),
            case_name: "Smith v. Jones".to_string(),
            volume: 123,
            reporter: "F.3d".to_string(),
            page: 456,
            court: "9th Cir.".to_string(),
            year: Some(2020),
        }
    }

    #[test]
    fn tagged_serialization() {
        let citation = ExtractedCitation::Case(sample_case());
        let json = serde_json::to_value(&citation).unwrap();
        assert_eq!(json["kind"], "case");
        assert_eq!(json["case_name"], "Smith v. Jones");

        let back: ExtractedCitation = serde_json::from_value(json).unwrap();
        assert_eq!(back, citation);
    }

    #[test]
    fn accessors() {
        let case = ExtractedCitation::Case(sample_case());
        assert_eq!(case.case_name(), Some("Smith v. Jones"));
        assert!(!case.is_statute());

        let statute = ExtractedCitation::Statute(StatuteCitation {
            full_citation: "42 U.S.C. § 1983".to_string(),
            title: 42,
            code: "U.S.C.".to_string(),
            section: "1983".to_string(),
        });
        assert_eq!(statute.case_name(), None);
        assert!(statute.is_statute());
        assert_eq!(statute.full_citation(), "42 U.S.C. § 1983");
    }
}
