//! Tool trait and the closed set of tools the prompt grammar can name.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

// ─────────────────────────────────────────────
// ToolName
// ─────────────────────────────────────────────

/// The tools a completion may call. The grammar names exactly these two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolName {
    WebSearch,
    Weather,
}

impl ToolName {
    /// Every tool, in prompt order.
    pub const ALL: [ToolName; 2] = [ToolName::WebSearch, ToolName::Weather];

    /// Name as written in the grammar (`[Tool: <label>: ...]`).
    pub fn label(self) -> &'static str {
        match self {
            ToolName::WebSearch => "Web Search",
            ToolName::Weather => "Weather",
        }
    }

    /// One-line description (listed by `askbot status`).
    pub fn summary(self) -> &'static str {
        match self {
            ToolName::WebSearch => "Top 3 DuckDuckGo results for a query (no API key).",
            ToolName::Weather => "Current conditions for a city (OpenWeatherMap).",
        }
    }

    /// Recognise a tool name from model output.
    ///
    /// Ignores ASCII case and whitespace, so `web search`, `WebSearch` and
    /// `WEB  SEARCH` all resolve to [`ToolName::WebSearch`].
    pub fn parse(name: &str) -> Option<Self> {
        let folded: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match folded.as_str() {
            "websearch" => Some(ToolName::WebSearch),
            "weather" => Some(ToolName::Weather),
            _ => None,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─────────────────────────────────────────────
// Tool trait
// ─────────────────────────────────────────────

/// A stateless lookup the reasoning loop can dispatch to.
///
/// `invoke` is total: provider failures are folded into the returned
/// string, so nothing crosses this boundary as an error.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Which grammar name this tool answers to.
    fn name(&self) -> ToolName;

    /// Run the lookup for `argument` and render the outcome as text.
    async fn invoke(&self, argument: &str) -> String;
}

// ─────────────────────────────────────────────
// Toolbox
// ─────────────────────────────────────────────

/// One implementation per [`ToolName`], looked up by exhaustive match.
#[derive(Clone)]
pub struct Toolbox {
    web_search: Arc<dyn Tool>,
    weather: Arc<dyn Tool>,
}

impl Toolbox {
    /// Each tool must answer to the name of the slot it fills.
    pub fn new(web_search: Arc<dyn Tool>, weather: Arc<dyn Tool>) -> Self {
        debug_assert_eq!(web_search.name(), ToolName::WebSearch);
        debug_assert_eq!(weather.name(), ToolName::Weather);
        Self {
            web_search,
            weather,
        }
    }

    /// The implementation for `name`.
    pub fn get(&self, name: ToolName) -> &dyn Tool {
        match name {
            ToolName::WebSearch => self.web_search.as_ref(),
            ToolName::Weather => self.weather.as_ref(),
        }
    }
}
