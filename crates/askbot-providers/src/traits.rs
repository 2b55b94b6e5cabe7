//! LLM provider trait — the completion-client seam of the reasoning loop.

use async_trait::async_trait;

use askbot_core::config::AgentConfig;

use crate::error::ProviderError;

/// Sampling parameters passed with each completion call.
#[derive(Clone, Debug)]
pub struct LlmRequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl From<&AgentConfig> for LlmRequestConfig {
    fn from(agent: &AgentConfig) -> Self {
        Self {
            max_tokens: agent.max_tokens,
            temperature: agent.temperature,
        }
    }
}

/// Turns one prompt into one completion.
///
/// The reasoning loop treats implementations as opaque; it only needs the
/// completion text or the reason there is none. Tests substitute scripted
/// implementations.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Complete `prompt`, returning the trimmed completion text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// The model this provider sends requests for.
    fn model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
