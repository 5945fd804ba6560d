//! OpenAI-compatible chat-completions provider
//!
//! Speaks the chat-completions wire format with JSON-object response mode.
//! The provider owns the HTTP client handle behind an explicit lifecycle:
//! `new` creates the provider unconnected, `ready` establishes the client
//! (idempotent, single-flight), `shutdown` releases it.
//!
//! Failures are surfaced, never retried here: retry policy belongs to the
//! caller. Timeouts from the underlying call map to a distinct error
//! variant instead of being folded into generic communication failures.

use async_trait::async_trait;
use docket_domain::traits::CompletionProvider;
use docket_domain::{CompletionRequest, CompletionResponse, ProviderError, TokenUsage};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the chat-completions provider
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API base endpoint
    pub endpoint: String,
    /// Bearer token
    pub api_key: String,
    /// Model identifier (e.g. "gpt-4o")
    pub model: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl OpenAiConfig {
    /// Create a configuration with default endpoint and timeout
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the API endpoint (for proxies and tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Chat-completions API provider.
///
/// The client handle is guarded so that concurrent analyses never race on
/// (re)initialization: `ready` checks under a read lock, then re-checks
/// under the write lock before building the client exactly once.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: RwLock<Option<reqwest::Client>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<TokenUsage>,
}

impl OpenAiProvider {
    /// Create an unconnected provider. Call [`ready`](Self::ready) before
    /// [`complete`](CompletionProvider::complete).
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
        }
    }

    /// Whether the underlying client has been established
    pub async fn is_ready(&self) -> bool {
        self.client.read().await.is_some()
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }

    async fn client_handle(&self) -> Result<reqwest::Client, ProviderError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(ProviderError::NotReady)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let client = self.client_handle().await?;

        let mut messages = Vec::new();
        if !request.system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: &request.system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.user,
        });

        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": request.temperature,
            "max_tokens": request.max_output_tokens,
        });
        if request.json_object {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Cancelled(e.to_string())
                } else {
                    ProviderError::Communication(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::Unauthorized(detail),
                404 => ProviderError::ModelNotAvailable(self.config.model.clone()),
                429 => ProviderError::QuotaExceeded(detail),
                _ => ProviderError::Communication(format!("HTTP {}: {}", status, detail)),
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("failed to parse envelope: {}", e)))?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("no choices in response".to_string()))?;

        Ok(CompletionResponse {
            text: choice.message.content,
            usage: chat.usage,
        })
    }

    async fn ready(&self) -> Result<(), ProviderError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        let mut slot = self.client.write().await;
        // A concurrent caller may have initialized while we waited.
        if slot.is_none() {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(self.config.request_timeout_secs))
                .build()
                .map_err(|e| ProviderError::Communication(format!("client build failed: {}", e)))?;
            debug!(endpoint = %self.config.endpoint, model = %self.config.model,
                "completion client initialized");
            *slot = Some(client);
        }
        Ok(())
    }

    async fn shutdown(&self) {
        let mut slot = self.client.write().await;
        if slot.take().is_some() {
            debug!("completion client released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(endpoint: &str) -> OpenAiConfig {
        OpenAiConfig::new("sk-test", "test-model").with_endpoint(endpoint)
    }

    fn chat_body(content: &str) -> serde_json::Value {
        json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }],
            "usage": { "prompt_tokens": 100, "completion_tokens": 50, "total_tokens": 150 }
        })
    }

    #[tokio::test]
    async fn complete_before_ready_fails() {
        let provider = OpenAiProvider::new(test_config("http://127.0.0.1:1"));
        let err = provider.complete(&CompletionRequest::probe()).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotReady));
    }

    #[tokio::test]
    async fn lifecycle_ready_shutdown() {
        let provider = OpenAiProvider::new(test_config("http://127.0.0.1:1"));
        assert!(!provider.is_ready().await);

        provider.ready().await.unwrap();
        assert!(provider.is_ready().await);

        // Idempotent
        provider.ready().await.unwrap();
        assert!(provider.is_ready().await);

        provider.shutdown().await;
        assert!(!provider.is_ready().await);
        let err = provider.complete(&CompletionRequest::probe()).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotReady));
    }

    #[tokio::test]
    async fn concurrent_ready_is_single_flight() {
        let provider = Arc::new(OpenAiProvider::new(test_config("http://127.0.0.1:1")));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let provider = Arc::clone(&provider);
            handles.push(tokio::spawn(async move { provider.ready().await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert!(provider.is_ready().await);
    }

    #[tokio::test]
    async fn successful_completion_parses_text_and_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("{\"ok\":true}")))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(test_config(&server.uri()));
        provider.ready().await.unwrap();

        let response = provider.complete(&CompletionRequest::probe()).await.unwrap();
        assert_eq!(response.text, "{\"ok\":true}");
        let usage = response.usage.unwrap();
        assert_eq!(usage.total_tokens, 150);
    }

    #[tokio::test]
    async fn auth_failure_maps_to_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(test_config(&server.uri()));
        provider.ready().await.unwrap();

        let err = provider.complete(&CompletionRequest::probe()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn rate_limit_maps_to_quota_exceeded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(test_config(&server.uri()));
        provider.ready().await.unwrap();

        let err = provider.complete(&CompletionRequest::probe()).await.unwrap_err();
        assert!(matches!(err, ProviderError::QuotaExceeded(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(test_config(&server.uri()));
        provider.ready().await.unwrap();

        let err = provider.complete(&CompletionRequest::probe()).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn connection_failure_maps_to_communication() {
        let provider = OpenAiProvider::new(test_config("http://127.0.0.1:9"));
        provider.ready().await.unwrap();

        let err = provider.complete(&CompletionRequest::probe()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Communication(_)));
    }
}
