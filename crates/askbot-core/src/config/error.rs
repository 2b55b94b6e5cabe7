//! Configuration errors.

use thiserror::Error;

/// Failures surfaced once at startup, before any query is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required secret is absent from both the config file and the environment.
    #[error("missing {name}: set {env} (or add it to ~/.askbot/config.json)")]
    MissingCredential {
        name: &'static str,
        env: &'static str,
    },
}
