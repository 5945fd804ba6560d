//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the domain model and
//! infrastructure. Implementations live in other crates: citation patterns
//! in `docket-citations`, completion providers in `docket-llm`.

use crate::citation::ExtractedCitation;
use crate::completion::{CompletionRequest, CompletionResponse, ProviderError};
use async_trait::async_trait;

/// Deterministic citation extraction from raw document text.
///
/// Implementations must not consult the language model and must be
/// order-stable: identical input text yields an identical sequence of
/// records across repeated runs. The post-processor depends only on this
/// output shape, so stricter or looser extractors can be swapped in without
/// touching it.
pub trait CitationExtractor: Send + Sync {
    /// Scan `text` and return every matched citation, in pattern-priority
    /// order and document order within a pattern, up to the implementation's
    /// configured cap.
    fn extract(&self, text: &str) -> Vec<ExtractedCitation>;
}

/// The seam to the text-completion service.
///
/// This is the pipeline's only suspension point. Implementations own the
/// underlying client handle; `ready` must be idempotent and safe to call
/// from concurrent analyses (initialize-once, single-flight).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one completion request and return the raw completion text.
    /// Never retried by the caller inside the pipeline.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Establish the underlying client. Idempotent; concurrent callers
    /// observe exactly one initialization.
    async fn ready(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Release the underlying client. Subsequent calls to `complete`
    /// fail with [`ProviderError::NotReady`] until `ready` is called again.
    async fn shutdown(&self) {}

    /// Minimal completion call confirming connectivity. The response
    /// content is not inspected.
    async fn health_check(&self) -> bool {
        self.complete(&CompletionRequest::probe()).await.is_ok()
    }
}
