//! Completion client errors.

use thiserror::Error;

/// A completion call that produced no usable text.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure (DNS, connect, timeout, TLS).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The body was not a chat completion response.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The response carried no choice with text content.
    #[error("response contained no content")]
    EmptyResponse,
}
