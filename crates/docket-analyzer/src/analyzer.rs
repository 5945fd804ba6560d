//! Core analyzer implementation: the staged pipeline
//!
//! raw text -> citation extraction -> prompt build -> completion call ->
//! normalize -> validate -> guard -> audited outcome
//!
//! Everything except the completion call is a non-suspending pure
//! transformation. Requests share no mutable state, so arbitrary
//! request-level parallelism is safe without locking.

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::normalize::normalize;
use crate::prompt::PromptBuilder;
use crate::types::{AnalysisOutcome, AnalysisRequest};
use crate::validate::parse_analysis;
use docket_citations::PatternExtractor;
use docket_domain::traits::{CitationExtractor, CompletionProvider};
use docket_domain::{AnalysisId, CompletionRequest, MotionAnalysis};
use docket_guard::{Guard, SourceIndex};
use docket_llm::{OpenAiConfig, OpenAiProvider};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

/// The motion analysis pipeline.
///
/// Owns the completion provider handle for its lifetime; the provider's own
/// lifecycle guard makes concurrent first calls safe.
pub struct MotionAnalyzer<P>
where
    P: CompletionProvider,
{
    provider: Arc<P>,
    extractor: Box<dyn CitationExtractor>,
    guard: Guard,
    config: AnalyzerConfig,
}

impl MotionAnalyzer<OpenAiProvider> {
    /// Convenience constructor wiring the chat-completions provider
    pub fn openai(
        config: AnalyzerConfig,
        provider_config: OpenAiConfig,
    ) -> Result<Self, AnalyzerError> {
        Self::new(OpenAiProvider::new(provider_config), config)
    }
}

impl<P> MotionAnalyzer<P>
where
    P: CompletionProvider,
{
    /// Create an analyzer over the given provider
    pub fn new(provider: P, config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate().map_err(AnalyzerError::Config)?;
        let citation_limit = config.citation_limit;
        Ok(Self {
            provider: Arc::new(provider),
            extractor: Box::new(PatternExtractor::with_cap(citation_limit)),
            guard: Guard::default_config(),
            config,
        })
    }

    /// Swap in a different citation extractor
    pub fn with_extractor(mut self, extractor: Box<dyn CitationExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Swap in a differently-configured guard
    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    /// Analyze one motion end to end.
    ///
    /// Fails with a tagged [`AnalyzerError`]; citation-reconciliation
    /// rejections are not failures and surface as warnings on the outcome.
    pub async fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> Result<AnalysisOutcome, AnalyzerError> {
        let start = SystemTime::now();

        if request.motion_text.len() > self.config.max_motion_length {
            return Err(AnalyzerError::MotionTooLong(
                request.motion_text.len(),
                self.config.max_motion_length,
            ));
        }

        self.provider.ready().await?;

        let analysis_id = AnalysisId::new();
        info!(
            %analysis_id,
            text_length = request.motion_text.len(),
            "starting motion analysis"
        );

        let citations = self.extractor.extract(&request.motion_text);
        debug!(extracted = citations.len(), "deterministic citation extraction complete");

        let prompts = PromptBuilder::new(&request.motion_text)
            .with_case_context(request.case_context.as_deref())
            .with_citations(&citations)
            .with_options(request.options)
            .build();

        let completion = CompletionRequest {
            system: prompts.system,
            user: prompts.user,
            temperature: self.config.temperature,
            json_object: true,
            max_output_tokens: self.config.max_output_tokens,
        };

        let response = self.provider.complete(&completion).await?;
        debug!(response_length = response.text.len(), "completion received");

        let raw: Value = serde_json::from_str(strip_code_fence(&response.text))
            .map_err(|e| AnalyzerError::MalformedCompletion(e.to_string()))?;

        let normalized = normalize(raw);
        let analysis = parse_analysis(&normalized)?;

        let source = SourceIndex::build(&request.motion_text, &citations);
        let (analysis, report) = self.guard.apply(analysis, &source);

        audit(&analysis)?;

        let processing_time_ms = start
            .elapsed()
            .unwrap_or(Duration::from_secs(0))
            .as_millis() as u64;

        if let Some(usage) = response.usage {
            info!(
                total_tokens = usage.total_tokens,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion token usage"
            );
        }
        info!(
            %analysis_id,
            arguments = analysis.total_arguments_found,
            dropped_citations = report.warnings.len(),
            processing_time_ms,
            "motion analysis complete"
        );

        Ok(AnalysisOutcome {
            analysis_id,
            analysis,
            warnings: report.warnings,
            usage: response.usage,
            processing_time_ms,
        })
    }

    /// Minimal completion call confirming provider connectivity
    pub async fn health_check(&self) -> bool {
        self.provider.health_check().await
    }

    /// Release the provider's underlying client
    pub async fn shutdown(&self) {
        self.provider.shutdown().await;
    }
}

/// Post-repair invariant audit. A failure here is a defect signal: the
/// normalizer and guard are supposed to make these impossible.
fn audit(analysis: &MotionAnalysis) -> Result<(), AnalyzerError> {
    if !analysis.count_is_consistent() {
        return Err(AnalyzerError::InternalInconsistency(format!(
            "total_arguments_found {} != argument list length {}",
            analysis.total_arguments_found,
            analysis.primary_arguments.len()
        )));
    }

    let grouped: usize = analysis.arguments_by_category.values().map(Vec::len).sum();
    if grouped != analysis.primary_arguments.len() {
        return Err(AnalyzerError::InternalInconsistency(format!(
            "category grouping holds {} ids for {} arguments",
            grouped,
            analysis.primary_arguments.len()
        )));
    }

    Ok(())
}

/// Completion services in JSON mode still occasionally wrap output in a
/// markdown code block; strip it before parsing.
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
