//! Docket Completion Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `docket-domain`.
//! This is the only layer that touches the external completion service; no
//! business logic lives here, and nothing here retries. Retry policy
//! belongs to the surrounding service layer.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing
//! - `OpenAiProvider`: chat-completions API over HTTP with JSON-object
//!   response mode
//!
//! # Examples
//!
//! ```
//! use docket_llm::MockProvider;
//! use docket_domain::traits::CompletionProvider;
//! use docket_domain::CompletionRequest;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("{\"primary_arguments\": []}");
//! let response = provider.complete(&CompletionRequest::probe()).await.unwrap();
//! assert_eq!(response.text, "{\"primary_arguments\": []}");
//! # });
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use docket_domain::traits::CompletionProvider;
use docket_domain::{CompletionRequest, CompletionResponse, ProviderError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub use openai::{OpenAiConfig, OpenAiProvider};

/// Mock completion provider for deterministic testing.
///
/// Returns pre-configured responses without making any network calls, and
/// records the requests it receives so tests can assert on prompt content.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    fail_all: bool,
    responses: Arc<Mutex<HashMap<String, String>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            fail_all: false,
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that fails every request
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Add a specific response keyed by the request's user instruction
    pub fn add_response(&mut self, user: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user.into(), response.into());
    }

    /// Configure a provider failure for a specific user instruction
    pub fn add_error(&mut self, user: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user.into(), "ERROR".to_string());
    }

    /// Number of completion calls received
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());

        if self.fail_all {
            return Err(ProviderError::Communication("mock failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(&request.user) {
            if response == "ERROR" {
                return Err(ProviderError::Communication("mock failure".to_string()));
            }
            return Ok(CompletionResponse {
                text: response.clone(),
                usage: None,
            });
        }

        Ok(CompletionResponse {
            text: self.default_response.clone(),
            usage: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_response_for_unknown_prompts() {
        let provider = MockProvider::new("fixed");
        let response = provider.complete(&CompletionRequest::probe()).await.unwrap();
        assert_eq!(response.text, "fixed");
        assert!(response.usage.is_none());
    }

    #[tokio::test]
    async fn keyed_responses_and_errors() {
        let mut provider = MockProvider::default();
        provider.add_response("analyze this", "{\"ok\": true}");
        provider.add_error("bad request");

        let mut request = CompletionRequest::probe();
        request.user = "analyze this".to_string();
        assert_eq!(
            provider.complete(&request).await.unwrap().text,
            "{\"ok\": true}"
        );

        request.user = "bad request".to_string();
        let err = provider.complete(&request).await.unwrap_err();
        assert!(matches!(err, ProviderError::Communication(_)));
    }

    #[tokio::test]
    async fn records_requests() {
        let provider = MockProvider::default();
        assert_eq!(provider.call_count(), 0);

        let mut request = CompletionRequest::probe();
        request.user = "first".to_string();
        provider.complete(&request).await.unwrap();
        request.user = "second".to_string();
        provider.complete(&request).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.last_request().unwrap().user, "second");
    }

    #[tokio::test]
    async fn health_check_uses_probe() {
        let provider = MockProvider::new("pong");
        assert!(provider.health_check().await);

        assert!(!MockProvider::failing().health_check().await);
    }

    #[tokio::test]
    async fn clones_share_request_log() {
        let provider = MockProvider::new("x");
        let clone = provider.clone();
        provider.complete(&CompletionRequest::probe()).await.unwrap();
        assert_eq!(clone.call_count(), 1);
    }
}
