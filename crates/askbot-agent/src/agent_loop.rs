//! Reasoning loop — prompt, complete, maybe call one tool, repeat.
//!
//! Each run is bounded twice: by `max_iterations`, and by the force-final
//! rule, which closes the run with a summarising completion as soon as a
//! tool is used at or after iteration `force_final_from`. With the defaults
//! (3 and 1) a run makes at most `max_iterations + 1` completion calls.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use askbot_providers::LlmProvider;

use crate::history::{History, ToolRecord};
use crate::prompt::{build_prompt, build_summary_prompt};
use crate::tool_call::ToolCall;
use crate::tools::{ToolName, Toolbox};

/// Default iteration cap per query.
pub const DEFAULT_MAX_ITERATIONS: usize = 3;

/// Default iteration index from which a tool use forces closure.
pub const DEFAULT_FORCE_FINAL_FROM: usize = 1;

/// Answer returned when the cap is hit without a terminal transition.
pub const MAX_ITERATIONS_MESSAGE: &str = "Error: Max iterations reached without a final answer.";

// ─────────────────────────────────────────────
// Outcome
// ─────────────────────────────────────────────

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// A completion without a tool marker was returned verbatim.
    FinalAnswer,
    /// A later tool use triggered the closing summary completion.
    ForcedSummary,
    /// The model named a tool outside the known set.
    InvalidTool,
    /// The iteration cap was exhausted.
    MaxIterations,
    /// The closing summary completion itself failed.
    SummaryFailed,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::FinalAnswer => "final answer",
            Termination::ForcedSummary => "forced summary",
            Termination::InvalidTool => "invalid tool",
            Termination::MaxIterations => "max iterations",
            Termination::SummaryFailed => "summary failed",
        };
        f.write_str(s)
    }
}

/// The answer of one run plus what it took to get there.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopOutcome {
    pub answer: String,
    pub termination: Termination,
    /// Completion calls attempted, failed ones included.
    pub completions: usize,
    /// Tool invocations performed.
    pub tool_calls: usize,
}

// ─────────────────────────────────────────────
// ReasoningLoop
// ─────────────────────────────────────────────

/// Drives one query from prompt to final answer.
///
/// Holds no per-query state: history and counters live inside
/// [`run_traced`](Self::run_traced), so a loop can serve any number of
/// queries one after another.
#[derive(Clone)]
pub struct ReasoningLoop {
    provider: Arc<dyn LlmProvider>,
    tools: Toolbox,
    max_iterations: usize,
    force_final_from: usize,
}

impl fmt::Debug for ReasoningLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReasoningLoop")
            .field("provider", &self.provider.display_name())
            .field("model", &self.provider.model())
            .field("max_iterations", &self.max_iterations)
            .field("force_final_from", &self.force_final_from)
            .finish()
    }
}

impl ReasoningLoop {
    pub fn new(provider: Arc<dyn LlmProvider>, tools: Toolbox) -> Self {
        Self {
            provider,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            force_final_from: DEFAULT_FORCE_FINAL_FROM,
        }
    }

    /// Set the iteration cap. Zero means every run ends at the cap at once.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the iteration index from which a tool use forces closure.
    /// `0` summarises straight after the first tool result.
    pub fn with_force_final_from(mut self, force_final_from: usize) -> Self {
        self.force_final_from = force_final_from;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn force_final_from(&self) -> usize {
        self.force_final_from
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Answer `query`. Never fails; every error path is a descriptive string.
    pub async fn run(&self, query: &str) -> String {
        self.run_traced(query).await.answer
    }

    /// Answer `query` and report how the run terminated.
    pub async fn run_traced(&self, query: &str) -> LoopOutcome {
        let mut history = History::new();
        let mut completions = 0;
        let mut tool_calls = 0;

        let finish = |answer: String, termination: Termination, completions, tool_calls| {
            info!(
                termination = %termination,
                completions = completions,
                tool_calls = tool_calls,
                "reasoning loop finished"
            );
            LoopOutcome {
                answer,
                termination,
                completions,
                tool_calls,
            }
        };

        for iteration in 0..self.max_iterations {
            let prompt = build_prompt(query, &history);
            completions += 1;

            let completion = match self.provider.complete(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(iteration = iteration, error = %e, "completion failed");
                    continue;
                }
            };
            debug!(iteration = iteration, completion = %completion, "raw completion");

            let Some(call) = ToolCall::extract(&completion) else {
                return finish(completion, Termination::FinalAnswer, completions, tool_calls);
            };

            let Some(tool) = ToolName::parse(&call.name) else {
                warn!(iteration = iteration, tool = %call.name, "model requested unknown tool");
                return finish(
                    format!("Error: Invalid tool {}", call.name),
                    Termination::InvalidTool,
                    completions,
                    tool_calls,
                );
            };

            info!(
                iteration = iteration,
                tool = %tool,
                argument = %call.argument,
                "executing tool call"
            );
            let result = self.tools.get(tool).invoke(&call.argument).await;
            tool_calls += 1;
            debug!(tool = %tool, result_len = result.len(), result = %result, "tool result");

            if let Some(previous) = history.record(ToolRecord::new(tool, call.argument, result)) {
                debug!(tool = %previous.tool, "replaced previous tool result");
            }

            if iteration >= self.force_final_from {
                completions += 1;
                return match self.provider.complete(&build_summary_prompt(&history)).await {
                    Ok(summary) => {
                        finish(summary, Termination::ForcedSummary, completions, tool_calls)
                    }
                    Err(e) => {
                        warn!(error = %e, "summary completion failed");
                        finish(
                            format!("Error: Unable to summarize tool result: {e}"),
                            Termination::SummaryFailed,
                            completions,
                            tool_calls,
                        )
                    }
                };
            }
        }

        finish(
            MAX_ITERATIONS_MESSAGE.to_string(),
            Termination::MaxIterations,
            completions,
            tool_calls,
        )
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
