//! Docket Analyzer
//!
//! Turns an unstructured legal-motion document into a structured, validated
//! argument analysis by orchestrating one completion call and deterministic
//! post-processing.
//!
//! # Architecture
//!
//! ```text
//! Text -> CitationExtractor -> PromptBuilder -> CompletionProvider
//!      -> normalize -> validate -> Guard -> AnalysisOutcome
//! ```
//!
//! The pipeline is staged: the completion's untyped JSON is first repaired
//! by a total, never-failing normalizer, then parsed by a strict structural
//! validator, and finally cross-checked by the anti-hallucination guard so
//! that no citation survives unless it is independently verifiable against
//! the source document.
//!
//! # Example Usage
//!
//! ```no_run
//! use docket_analyzer::{AnalyzerConfig, AnalysisRequest, MotionAnalyzer};
//! use docket_llm::OpenAiConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = MotionAnalyzer::openai(
//!     AnalyzerConfig::default(),
//!     OpenAiConfig::new(std::env::var("OPENAI_API_KEY")?, "gpt-4o"),
//! )?;
//!
//! let outcome = analyzer
//!     .analyze(AnalysisRequest::new("...full motion text..."))
//!     .await?;
//!
//! println!("Arguments found: {}", outcome.analysis.total_arguments_found);
//! println!("Citations dropped: {}", outcome.warnings.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod normalize;
mod prompt;
mod types;
mod validate;

#[cfg(test)]
mod tests;

pub use analyzer::MotionAnalyzer;
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use normalize::normalize;
pub use prompt::{PromptBuilder, PromptPair};
pub use types::{AnalysisOutcome, AnalysisRequest};
pub use validate::parse_analysis;
