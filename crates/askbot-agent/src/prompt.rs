//! Prompt builder — the instruction sent to the model on every iteration.
//!
//! The prompt carries the tool-call grammar the loop parses back out of
//! completions, so the marker format here and the pattern in
//! [`crate::tool_call`] must stay in step.

use crate::history::History;
use crate::tools::ToolName;

/// Query used for the forced closing completion.
pub const SUMMARIZE_INSTRUCTION: &str = "Summarize the tool result into a detailed answer.";

/// Grammar line for one tool: `[Tool: <label>: <placeholder>]`.
fn tool_marker(tool: ToolName) -> String {
    let placeholder = match tool {
        ToolName::WebSearch => "<exact query for search>",
        ToolName::Weather => "<city>",
    };
    format!("[Tool: {}: {}]", tool.label(), placeholder)
}

/// Build the prompt for `query` given the current `history`.
///
/// Pure: the same inputs always produce the same string.
pub fn build_prompt(query: &str, history: &History) -> String {
    let tools = ToolName::ALL
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = String::with_capacity(1024);
    prompt.push_str(&format!(
        "You are a helpful assistant that can answer directly or use tools ({tools}).\n"
    ));
    prompt.push_str("IMPORTANT RULES:\n");
    prompt.push_str(&format!(
        "- If the query is about CURRENT EVENTS, NEWS, or up-to-date info (e.g., \"latest news\"), \
         ALWAYS use EXACTLY this format for the FIRST response: {}\n",
        tool_marker(ToolName::WebSearch)
    ));
    prompt.push_str(&format!(
        "- For weather, use EXACTLY: {}\n",
        tool_marker(ToolName::Weather)
    ));
    prompt.push_str(
        "- After a tool result, summarize it into a detailed final answer \
         (2-3 sentences, cite sources/dates).\n",
    );
    prompt.push_str("- Otherwise, answer directly if confident.\n");
    prompt.push_str("- NEVER guess news—always tool first.\n\n");
    prompt.push_str(&format!("History: {}\n", history.render()));
    prompt.push_str(&format!("User Input: {query}\n"));
    prompt.push_str(
        "Respond with EITHER a tool call in EXACT format OR a detailed final answer.\n",
    );
    prompt
}

/// Prompt for the closing completion after a tool round.
pub fn build_summary_prompt(history: &History) -> String {
    build_prompt(SUMMARIZE_INSTRUCTION, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ToolRecord;
    use crate::tool_call::ToolCall;

    fn weather_history() -> History {
        let mut history = History::new();
        history.record(ToolRecord::new(
            ToolName::Weather,
            "Paris",
            "It's 18.5°C and light rain in Paris.",
        ));
        history
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let history = weather_history();
        assert_eq!(
            build_prompt("weather in Paris?", &history),
            build_prompt("weather in Paris?", &history)
        );
    }

    #[test]
    fn test_prompt_contains_grammar() {
        let prompt = build_prompt("hi", &History::new());
        assert!(prompt.contains("[Tool: Web Search: <exact query for search>]"));
        assert!(prompt.contains("[Tool: Weather: <city>]"));
        assert!(prompt.contains("2-3 sentences, cite sources/dates"));
        assert!(prompt.contains("use tools (Web Search, Weather)"));
    }

    #[test]
    fn test_grammar_lines_parse_back() {
        for tool in ToolName::ALL {
            let call = ToolCall::extract(&tool_marker(tool)).unwrap();
            assert_eq!(ToolName::parse(&call.name), Some(tool));
        }
    }

    #[test]
    fn test_prompt_embeds_query_and_empty_history() {
        let prompt = build_prompt("What is the capital of France?", &History::new());
        assert!(prompt.contains("History: \nUser Input: What is the capital of France?\n"));
    }

    #[test]
    fn test_prompt_embeds_history() {
        let prompt = build_prompt("weather in Paris?", &weather_history());
        assert!(prompt.contains(
            "History: \nTool Used: Weather\nInput: Paris\nResult: It's 18.5°C and light rain in Paris.\n\
             User Input: weather in Paris?"
        ));
    }

    #[test]
    fn test_summary_prompt() {
        let history = weather_history();
        let prompt = build_summary_prompt(&history);
        assert_eq!(prompt, build_prompt(SUMMARIZE_INSTRUCTION, &history));
        assert!(prompt.contains("User Input: Summarize the tool result into a detailed answer."));
    }
}
