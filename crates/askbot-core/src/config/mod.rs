//! Configuration system — schema, loading, env var overrides, credentials.
//!
//! # Usage
//! ```no_run
//! use askbot_core::config;
//!
//! config::load_dotenv();
//! let cfg = config::load_config(None);
//! let creds = config::Credentials::from_config(&cfg).expect("secrets configured");
//! println!("Model: {} ({:?})", cfg.agent.model, creds);
//! ```

pub mod credentials;
pub mod error;
pub mod loader;
pub mod schema;

// Re-export key types
pub use credentials::{Credentials, COMPLETION_KEY_ENV, WEATHER_KEY_ENV};
pub use error::ConfigError;
pub use loader::{get_config_path, load_config, load_dotenv};
pub use schema::{
    AgentConfig, Config, ProviderSettings, SearchConfig, ServerConfig, ToolsConfig, WeatherConfig,
};
