//! Completion client layer for Askbot.
//!
//! # Architecture
//!
//! - [`traits::LlmProvider`] — prompt string in, completion string out
//! - [`http_provider::HttpProvider`] — OpenAI-compatible HTTP client (Groq by default)
//! - [`error::ProviderError`] — why a completion could not be produced

pub mod error;
pub mod http_provider;
pub mod traits;

// Re-export main types for convenience
pub use error::ProviderError;
pub use http_provider::HttpProvider;
pub use traits::{LlmProvider, LlmRequestConfig};
