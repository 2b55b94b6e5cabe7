//! Single-slot tool history.
//!
//! Only the most recent tool interaction is kept; recording a new one
//! replaces the old. This bounds the prompt to one tool result.

use crate::tools::ToolName;

/// One executed tool call and what it returned.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolRecord {
    pub tool: ToolName,
    pub input: String,
    pub result: String,
}

impl ToolRecord {
    pub fn new(tool: ToolName, input: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            tool,
            input: input.into(),
            result: result.into(),
        }
    }
}

/// History of one loop run. Lives and dies with that run.
#[derive(Clone, Debug, Default)]
pub struct History {
    slot: Option<ToolRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record`, returning the record it displaced.
    pub fn record(&mut self, record: ToolRecord) -> Option<ToolRecord> {
        self.slot.replace(record)
    }

    /// Prompt text for the retained record; empty when nothing is recorded.
    pub fn render(&self) -> String {
        match &self.slot {
            Some(rec) => format!(
                "\nTool Used: {}\nInput: {}\nResult: {}",
                rec.tool, rec.input, rec.result
            ),
            None => String::new(),
        }
    }
}
