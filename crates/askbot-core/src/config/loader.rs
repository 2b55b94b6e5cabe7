//! Config loader — reads `~/.askbot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.askbot/config.json`
//! 3. Bare secret env vars `GROQ_API_KEY`, `WEATHER_API_KEY`
//! 4. Environment variables `ASKBOT_<SECTION>__<FIELD>`
//!
//! A `.env` file in the working directory is folded into the process
//! environment by [`load_dotenv`] before any of this runs.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::credentials::{COMPLETION_KEY_ENV, WEATHER_KEY_ENV};
use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load `.env` from the working directory (or a parent) if one exists.
///
/// Variables already present in the environment are left untouched.
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env: {}", e),
    }
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    let config = load_config_from_path(&config_path);
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Load config from a specific file path (no env overrides).
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Apply environment variable overrides on top of a loaded config.
///
/// `lookup` resolves a variable name to its value; the process environment
/// in production, a fixed map in tests.
///
/// Env var format: `ASKBOT_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `GROQ_API_KEY`, `ASKBOT_PROVIDER__API_KEY` → `provider.api_key`
/// - `ASKBOT_PROVIDER__API_BASE` → `provider.api_base`
/// - `ASKBOT_AGENT__MODEL` → `agent.model`
/// - `ASKBOT_AGENT__TEMPERATURE` → `agent.temperature`
/// - `ASKBOT_AGENT__MAX_TOKENS` → `agent.max_tokens`
/// - `ASKBOT_AGENT__MAX_ITERATIONS` → `agent.max_iterations`
/// - `WEATHER_API_KEY`, `ASKBOT_TOOLS__WEATHER__API_KEY` → `tools.weather.api_key`
/// - `ASKBOT_TOOLS__WEATHER__API_BASE` → `tools.weather.api_base`
/// - `ASKBOT_TOOLS__SEARCH__API_BASE` → `tools.search.api_base`
/// - `ASKBOT_SERVER__HOST` → `server.host`
/// - `ASKBOT_SERVER__PORT` → `server.port`
fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // Secrets: bare names first so the prefixed forms win
    if let Some(val) = lookup(COMPLETION_KEY_ENV) {
        config.provider.api_key = val;
    }
    if let Some(val) = lookup(WEATHER_KEY_ENV) {
        config.tools.weather.api_key = val;
    }

    // Provider
    if let Some(val) = lookup("ASKBOT_PROVIDER__API_KEY") {
        config.provider.api_key = val;
    }
    if let Some(val) = lookup("ASKBOT_PROVIDER__API_BASE") {
        config.provider.api_base = val;
    }

    // Agent
    if let Some(val) = lookup("ASKBOT_AGENT__MODEL") {
        config.agent.model = val;
    }
    if let Some(val) = lookup("ASKBOT_AGENT__TEMPERATURE") {
        match val.parse::<f64>() {
            Ok(t) => config.agent.temperature = t,
            Err(_) => warn!("Ignoring invalid ASKBOT_AGENT__TEMPERATURE={}", val),
        }
    }
    if let Some(val) = lookup("ASKBOT_AGENT__MAX_TOKENS") {
        match val.parse::<u32>() {
            Ok(n) => config.agent.max_tokens = n,
            Err(_) => warn!("Ignoring invalid ASKBOT_AGENT__MAX_TOKENS={}", val),
        }
    }
    if let Some(val) = lookup("ASKBOT_AGENT__MAX_ITERATIONS") {
        match val.parse::<usize>() {
            Ok(n) => config.agent.max_iterations = n,
            Err(_) => warn!("Ignoring invalid ASKBOT_AGENT__MAX_ITERATIONS={}", val),
        }
    }

    // Tools
    if let Some(val) = lookup("ASKBOT_TOOLS__WEATHER__API_KEY") {
        config.tools.weather.api_key = val;
    }
    if let Some(val) = lookup("ASKBOT_TOOLS__WEATHER__API_BASE") {
        config.tools.weather.api_base = val;
    }
    if let Some(val) = lookup("ASKBOT_TOOLS__SEARCH__API_BASE") {
        config.tools.search.api_base = val;
    }

    // Server
    if let Some(val) = lookup("ASKBOT_SERVER__HOST") {
        config.server.host = val;
    }
    if let Some(val) = lookup("ASKBOT_SERVER__PORT") {
        match val.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => warn!("Ignoring invalid ASKBOT_SERVER__PORT={}", val),
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
