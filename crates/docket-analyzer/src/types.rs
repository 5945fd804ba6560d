//! Request and outcome types for the analysis pipeline

use docket_domain::{AnalysisId, AnalysisOptions, MotionAnalysis, TokenUsage};
use docket_guard::GuardWarning;

/// One analysis request
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Full text of the motion to analyze
    pub motion_text: String,

    /// Additional case context, when the caller has it
    pub case_context: Option<String>,

    /// Per-request analysis switches
    pub options: AnalysisOptions,
}

impl AnalysisRequest {
    /// Create a request with default options and no case context
    pub fn new(motion_text: impl Into<String>) -> Self {
        Self {
            motion_text: motion_text.into(),
            case_context: None,
            options: AnalysisOptions::default(),
        }
    }

    /// Attach case context
    pub fn with_case_context(mut self, case_context: impl Into<String>) -> Self {
        self.case_context = Some(case_context.into());
        self
    }

    /// Override the analysis options
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }
}

/// The result of one successful pipeline run
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Identifier assigned to this analysis
    pub analysis_id: AnalysisId,

    /// The validated, post-processed analysis
    pub analysis: MotionAnalysis,

    /// Silent corrections applied by the guard (dropped citations)
    pub warnings: Vec<GuardWarning>,

    /// Token accounting, when the provider reported it
    pub usage: Option<TokenUsage>,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,
}
