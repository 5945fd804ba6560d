//! Per-request analysis options

use serde::{Deserialize, Serialize};

/// Caller-selected switches for one analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Include case law citation analysis
    pub include_citations: bool,
    /// Verify citation accuracy against the source (slower)
    pub verify_citations: bool,
    /// Extract expert witness challenges
    pub extract_expert_challenges: bool,
    /// Analyze procedural defenses
    pub analyze_procedural_defenses: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            include_citations: true,
            verify_citations: false,
            extract_expert_challenges: true,
            analyze_procedural_defenses: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_request_contract() {
        let options = AnalysisOptions::default();
        assert!(options.include_citations);
        assert!(!options.verify_citations);
        assert!(options.extract_expert_challenges);
        assert!(options.analyze_procedural_defenses);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let options: AnalysisOptions =
            serde_json::from_str(r#"{"verify_citations": true}"#).unwrap();
        assert!(options.verify_citations);
        assert!(options.include_citations);
    }
}
