//! Analysis result aggregate - the output of one pipeline run

use crate::argument::{Argument, ArgumentCategory, StrengthLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for one analysis request, based on UUIDv7
///
/// UUIDv7 provides chronological sortability and coordination-free
/// generation, so concurrent analyses never contend for identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnalysisId(u128);

impl AnalysisId {
    /// Generate a new UUIDv7-based AnalysisId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse an AnalysisId from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid analysis id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A recommended research area for the responding party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchPriority {
    /// Area requiring research
    pub research_area: String,
    /// Priority level in [1, 5]; 1 is highest
    pub priority_level: u8,
    /// Recommended research sources
    pub suggested_sources: Vec<String>,
    /// Key questions to investigate
    pub key_questions: Vec<String>,
    /// Ids of arguments this research relates to
    pub related_argument_ids: Vec<String>,
}

/// The structured analysis of one motion.
///
/// Exclusively owns all nested arguments and citations for the duration of
/// one request; nothing here is shared across requests. Invariant:
/// `total_arguments_found` equals `primary_arguments.len()` at all times
/// after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionAnalysis {
    /// Type of motion (e.g. "Motion for Summary Judgment")
    pub motion_type: String,
    /// Case identification number, when stated
    pub case_number: Option<String>,
    /// Parties involved
    pub parties: Vec<String>,
    /// Filing date as stated in the motion, when present
    pub filing_date: Option<String>,
    /// All identified arguments, in model output order plus any
    /// synthesized placeholders
    pub primary_arguments: Vec<Argument>,
    /// Category label -> argument ids filed under it
    pub arguments_by_category: BTreeMap<String, Vec<String>>,
    /// Category labels present among the arguments
    pub categories_used: Vec<String>,
    /// Labels in `categories_used` outside the standard taxonomy
    pub custom_categories: Vec<String>,
    /// Heuristically detected gaps in the analysis, at most 5
    pub notable_omissions: Vec<String>,
    /// Procedural issues identified
    pub procedural_issues: Vec<String>,
    /// Evidence admissibility challenges
    pub evidence_challenges: Vec<String>,
    /// Expert witness challenges
    pub expert_witness_issues: Vec<String>,
    /// Research recommendations
    pub research_priorities: Vec<ResearchPriority>,
    /// Overall motion strength assessment
    pub overall_strength: StrengthLevel,
    /// Risk level in [1, 10]
    pub risk_assessment: u8,
    /// Recommended response actions
    pub recommended_actions: Vec<String>,
    /// Count of arguments; always equals `primary_arguments.len()`
    pub total_arguments_found: usize,
}

impl MotionAnalysis {
    /// Whether the argument count invariant holds
    pub fn count_is_consistent(&self) -> bool {
        self.total_arguments_found == self.primary_arguments.len()
    }

    /// Categories present among the arguments, in first-seen order
    pub fn categories_present(&self) -> Vec<ArgumentCategory> {
        let mut seen = Vec::new();
        for argument in &self.primary_arguments {
            if !seen.contains(&argument.category) {
                seen.push(argument.category.clone());
            }
        }
        seen
    }

    /// Look up an argument by id
    pub fn argument(&self, argument_id: &str) -> Option<&Argument> {
        self.primary_arguments
            .iter()
            .find(|a| a.argument_id == argument_id)
    }
}
