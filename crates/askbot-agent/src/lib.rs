//! Askbot Agent — the reasoning loop and everything it drives.
//!
//! This crate contains:
//! - **tools**: the two tools (web search, weather) behind the `Tool` trait
//! - **prompt**: the instruction and tool-call grammar sent to the model
//! - **tool_call**: extraction of `[Tool: ...]` markers from completions
//! - **history**: the single-slot record of the latest tool result
//! - **agent_loop**: the bounded prompt → completion → tool cycle

pub mod agent_loop;
pub mod history;
pub mod prompt;
pub mod tool_call;
pub mod tools;

pub use agent_loop::{
    LoopOutcome, ReasoningLoop, Termination, DEFAULT_FORCE_FINAL_FROM, DEFAULT_MAX_ITERATIONS,
    MAX_ITERATIONS_MESSAGE,
};
pub use history::{History, ToolRecord};
pub use prompt::{build_prompt, build_summary_prompt, SUMMARIZE_INSTRUCTION};
pub use tool_call::ToolCall;
pub use tools::{Tool, ToolName, Toolbox, WeatherTool, WebSearchTool};
