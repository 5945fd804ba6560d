//! Configuration for the analyzer

use serde::{Deserialize, Serialize};

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Model identifier forwarded to the provider
    pub model: String,

    /// Sampling temperature; deterministic-leaning by default
    pub temperature: f32,

    /// Output length ceiling in tokens
    pub max_output_tokens: u32,

    /// Maximum motion text length (characters)
    pub max_motion_length: usize,

    /// Cap on deterministically extracted citations embedded in the prompt
    pub citation_limit: usize,
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature {} out of range [0.0, 2.0]", self.temperature));
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be greater than 0".to_string());
        }
        if self.max_motion_length == 0 {
            return Err("max_motion_length must be greater than 0".to_string());
        }
        if self.citation_limit == 0 {
            return Err("citation_limit must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Concise preset: shorter completions, fewer embedded citations
    pub fn concise() -> Self {
        Self {
            max_output_tokens: 1_500,
            citation_limit: 10,
            ..Self::default()
        }
    }

    /// Thorough preset: longer documents and completions, more embedded
    /// citations
    pub fn thorough() -> Self {
        Self {
            max_output_tokens: 6_000,
            max_motion_length: 100_000,
            citation_limit: 50,
            ..Self::default()
        }
    }
}

impl Default for AnalyzerConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.1,
            max_output_tokens: 3_000,
            max_motion_length: 50_000,
            citation_limit: 20,
        }
    }
}
