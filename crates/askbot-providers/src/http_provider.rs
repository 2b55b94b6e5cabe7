//! HTTP completion client for OpenAI-compatible APIs.
//!
//! Talks to any `/chat/completions` endpoint; the default configuration
//! points at Groq. Each prompt is sent as a single user message.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use askbot_core::config::{AgentConfig, ProviderSettings};
use askbot_core::types::{ChatCompletionRequest, ChatCompletionResponse, Message};

use crate::error::ProviderError;
use crate::traits::{LlmProvider, LlmRequestConfig};

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// A completion client that talks to an OpenAI-compatible HTTP API.
pub struct HttpProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.groq.com/openai/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Model sent with every request.
    model: String,
    /// Temperature and token limit.
    request_config: LlmRequestConfig,
    /// Name used in log lines.
    display_name: &'static str,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("provider", &self.display_name)
            .finish()
    }
}

impl HttpProvider {
    /// Create a new HttpProvider.
    ///
    /// # Arguments
    /// * `settings` — endpoint and timeout
    /// * `agent`    — model and sampling parameters
    /// * `api_key`  — the resolved completion-service credential
    pub fn new(
        settings: &ProviderSettings,
        agent: &AgentConfig,
        api_key: &str,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(HttpProvider {
            client,
            api_base: settings.api_base.clone(),
            api_key: api_key.to_string(),
            model: agent.model.clone(),
            request_config: LlmRequestConfig::from(agent),
            display_name: display_name_for(&settings.api_base),
        })
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

/// Friendly provider name guessed from the API base.
fn display_name_for(api_base: &str) -> &'static str {
    let base = api_base.to_lowercase();
    if base.contains("groq") {
        "Groq"
    } else if base.contains("openai.com") {
        "OpenAI"
    } else if base.contains("openrouter") {
        "OpenRouter"
    } else {
        "OpenAI-compatible"
    }
}

#[async_trait]
impl LlmProvider for HttpProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(
            provider = self.display_name,
            model = %self.model,
            prompt_len = prompt.len(),
            "Calling LLM"
        );

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens: Some(self.request_config.max_tokens),
            temperature: Some(self.request_config.temperature),
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.display_name, error = %e, "HTTP request failed");
                ProviderError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = self.display_name,
                status = %status,
                body = %body,
                "API error"
            );
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat_resp: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(provider = self.display_name, error = %e, "Failed to parse LLM response");
            ProviderError::Parse(e.to_string())
        })?;

        debug!(
            provider = self.display_name,
            choices = chat_resp.choices.len(),
            finish_reason = chat_resp
                .choices
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("?"),
            total_tokens = chat_resp.usage.as_ref().map_or(0, |u| u.total_tokens),
            "LLM response received"
        );

        chat_resp
            .first_content()
            .map(|text| text.trim().to_string())
            .ok_or(ProviderError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn display_name(&self) -> &str {
        self.display_name
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_provider(api_base: &str, api_key: &str) -> HttpProvider {
        let settings = ProviderSettings {
            api_base: api_base.to_string(),
            ..Default::default()
        };
        HttpProvider::new(&settings, &AgentConfig::default(), api_key).unwrap()
    }

    fn completion_body(content: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "choices": [{
                "message": { "content": content },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 5,
                "total_tokens": 15
            }
        })
    }

    // ── Unit tests ──

    #[test]
    fn test_completions_url_trailing_slash() {
        let provider = make_provider("https://api.groq.com/openai/v1/", "key");
        assert_eq!(
            provider.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_completions_url_no_trailing_slash() {
        let provider = make_provider("https://api.groq.com/openai/v1", "key");
        assert_eq!(
            provider.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(make_provider("https://api.groq.com/openai/v1", "k").display_name(), "Groq");
        assert_eq!(make_provider("https://api.openai.com/v1", "k").display_name(), "OpenAI");
        assert_eq!(
            make_provider("http://localhost:8000/v1", "k").display_name(),
            "OpenAI-compatible"
        );
    }

    #[test]
    fn test_model_from_agent_config() {
        let provider = make_provider("https://api.groq.com/openai/v1", "k");
        assert_eq!(provider.model(), "llama-3.1-8b-instant");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let provider = make_provider("https://api.groq.com/openai/v1", "gsk-very-secret");
        assert!(!format!("{provider:?}").contains("gsk-very-secret"));
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_complete_success_trims() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key-123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body(serde_json::json!("  Paris is the capital.\n"))),
            )
            .mount(&mock_server)
            .await;

        let provider = make_provider(&mock_server.uri(), "test-key-123");
        let text = provider.complete("What is the capital of France?").await.unwrap();
        assert_eq!(text, "Paris is the capital.");
    }

    #[tokio::test]
    async fn test_complete_sends_prompt_as_user_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-3.1-8b-instant",
                "temperature": 0.0,
                "max_tokens": 1024,
                "messages": [{ "role": "user", "content": "the prompt" }]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body(serde_json::json!("ok"))),
            )
            .mount(&mock_server)
            .await;

        let provider = make_provider(&mock_server.uri(), "key");
        // If the body matcher fails, wiremock returns 404 → we'd get an error
        assert_eq!(provider.complete("the prompt").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&mock_server)
            .await;

        let provider = make_provider(&mock_server.uri(), "key");
        let err = provider.complete("Hello").await.unwrap_err();

        match err {
            ProviderError::Api { status, ref body } => {
                assert_eq!(status, 429);
                assert!(body.contains("Rate limit"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_complete_network_error() {
        // Point to a port that's not listening
        let provider = make_provider("http://127.0.0.1:1", "key");
        let err = provider.complete("Hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::Http(_)));
    }

    #[tokio::test]
    async fn test_complete_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&mock_server)
            .await;

        let provider = make_provider(&mock_server.uri(), "key");
        let err = provider.complete("Hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[tokio::test]
    async fn test_complete_null_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body(serde_json::Value::Null)),
            )
            .mount(&mock_server)
            .await;

        let provider = make_provider(&mock_server.uri(), "key");
        let err = provider.complete("Hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }
}
