//! Guard configuration

use docket_domain::ArgumentCategory;

/// Configuration for the post-processing passes
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Categories that must be present in every final analysis; absent ones
    /// are synthesized as neutral placeholders
    pub required_categories: Vec<ArgumentCategory>,

    /// Upper bound on the notable-omissions list
    pub max_omission_notes: usize,

    /// Maximum arguments linked to one research priority
    pub max_linked_arguments: usize,

    /// Synthesize a generic research priority when the model returns none
    pub ensure_research_priorities: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            required_categories: vec![
                ArgumentCategory::NegligenceCausation,
                ArgumentCategory::LiabilityIssues,
                ArgumentCategory::ProceduralDefenses,
            ],
            max_omission_notes: 5,
            max_linked_arguments: 3,
            ensure_research_priorities: true,
        }
    }
}

impl GuardConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_omission_notes == 0 {
            return Err("max_omission_notes must be greater than 0".to_string());
        }
        if self.max_linked_arguments == 0 {
            return Err("max_linked_arguments must be greater than 0".to_string());
        }
        Ok(())
    }
}
