//! Completion service request/response types and error taxonomy

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single request to the text-completion service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction (role, taxonomy, output shape)
    pub system: String,
    /// User instruction (motion text, context, extracted citations)
    pub user: String,
    /// Sampling temperature; deterministic-leaning for analysis
    pub temperature: f32,
    /// Request a single JSON object as the response shape
    pub json_object: bool,
    /// Output length ceiling in tokens
    pub max_output_tokens: u32,
}

impl CompletionRequest {
    /// Minimal request used for connectivity checks. The response content
    /// is never inspected.
    pub fn probe() -> Self {
        Self {
            system: String::new(),
            user: "test".to_string(),
            temperature: 0.0,
            json_object: false,
            max_output_tokens: 10,
        }
    }
}

/// Token accounting reported by the completion service, when available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens billed
    pub total_tokens: u32,
}

/// Raw completion returned by the service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Raw completion text, expected to parse as one JSON object
    pub text: String,
    /// Token accounting, when the provider reports it
    pub usage: Option<TokenUsage>,
}

/// Errors surfaced by a completion provider.
///
/// None of these are retried by the pipeline; retry policy belongs to the
/// surrounding service layer. Timeouts and cancellations from the underlying
/// call are a distinct variant rather than being folded into communication
/// failures.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network or API communication failure
    #[error("communication error: {0}")]
    Communication(String),

    /// The service rejected the credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit or quota exhausted
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The requested model is not available
    #[error("model not available: {0}")]
    ModelNotAvailable(String),

    /// The underlying call timed out or was cancelled
    #[error("request timed out or was cancelled: {0}")]
    Cancelled(String),

    /// The response envelope could not be interpreted
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// The provider has not been initialized
    #[error("provider not initialized")]
    NotReady,
}
