//! Extraction of `[Tool: <name>: <argument>]` markers from completions.
//!
//! Best-effort by nature: a completion without a marker is simply a final
//! answer, so `None` is the expected outcome most of the time.

use std::sync::LazyLock;

use regex::Regex;

/// `[Tool: <name> : <argument>]`, case-insensitive, whitespace-tolerant.
/// The name stops at the first `:`; the argument at the first `]`.
static TOOL_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*tool\s*:\s*([^:\]\n]+?)\s*:\s*([^\]\n]*?)\s*\]")
        .expect("tool call regex is valid")
});

/// A tool request as written by the model. The name is not yet validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub argument: String,
}

impl ToolCall {
    /// First tool marker in `completion`, if any.
    pub fn extract(completion: &str) -> Option<Self> {
        let caps = TOOL_CALL_RE.captures(completion)?;
        Some(Self {
            name: caps.get(1)?.as_str().trim().to_string(),
            argument: caps.get(2)?.as_str().trim().to_string(),
        })
    }
}
