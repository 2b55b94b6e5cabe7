//! Configuration schema.
//!
//! Hierarchy: `Config` → `AgentConfig`, `ProviderSettings`, `ToolsConfig`,
//! `ServerConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.askbot/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub agent: AgentConfig,
    pub provider: ProviderSettings,
    pub tools: ToolsConfig,
    pub server: ServerConfig,
}

// ─────────────────────────────────────────────
// Agent
// ─────────────────────────────────────────────

/// Reasoning loop and completion settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// Completion model identifier.
    pub model: String,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// Maximum tokens to generate per completion.
    pub max_tokens: u32,
    /// Iteration cap of the reasoning loop.
    pub max_iterations: usize,
    /// Iteration index from which a tool use forces the summarising
    /// completion instead of another round.
    pub force_final_from: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.0,
            max_tokens: 1024,
            max_iterations: 3,
            force_final_from: 1,
        }
    }
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// Completion service connection (any OpenAI-compatible endpoint).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    /// API key for bearer authentication. Required.
    pub api_key: String,
    /// API base URL, without the `/chat/completions` suffix.
    pub api_base: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ProviderSettings {
    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://api.groq.com/openai/v1".to_string(),
            timeout_secs: 120,
        }
    }
}

// ─────────────────────────────────────────────
// Tools
// ─────────────────────────────────────────────

/// Tool configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolsConfig {
    pub search: SearchConfig,
    pub weather: WeatherConfig,
}

/// Web search configuration (DuckDuckGo HTML endpoint, no key).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Search endpoint URL.
    pub api_base: String,
    /// Maximum number of results to format.
    pub max_results: usize,
    /// Characters of each result body kept in the formatted output.
    pub snippet_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base: "https://html.duckduckgo.com/html/".to_string(),
            max_results: 3,
            snippet_chars: 200,
        }
    }
}

/// Weather lookup configuration (OpenWeatherMap current weather).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key. Required.
    pub api_key: String,
    /// Base URL, without the `/data/2.5/weather` path.
    pub api_base: String,
    /// Unit system passed to the provider.
    pub units: String,
}

impl WeatherConfig {
    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "http://api.openweathermap.org".to_string(),
            units: "metric".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// Form UI listen address.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7860,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
