//! Extraction configuration

/// Configuration for the pattern extractor
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Hard cap on extracted records, to bound prompt size
    pub max_citations: usize,
}

impl ExtractionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_citations == 0 {
            return Err("max_citations must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { max_citations: 20 }
    }
}
