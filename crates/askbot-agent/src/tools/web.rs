//! Web search tool — DuckDuckGo HTML results, no API key.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use askbot_core::config::SearchConfig;
use askbot_core::utils::take_chars;

use super::base::{Tool, ToolName};

/// User-Agent header. The HTML endpoint rejects obvious bots.
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_7_2) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Ad results redirect through this path.
const AD_REDIRECT: &str = "duckduckgo.com/y.js";

static RESULT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\b([^>]*\bclass="[^"]*\bresult__a\b[^"]*"[^>]*)>(.*?)</a>"#)
        .expect("result link regex is valid")
});

static SNIPPET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<(?:a|div)\b[^>]*\bclass="[^"]*\bresult__snippet\b[^"]*"[^>]*>(.*?)</(?:a|div)>"#)
        .expect("snippet regex is valid")
});

static EXTRAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)class="result__extras__url"(.*?)</div>"#).expect("extras regex is valid")
});

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bhref="([^"]*)""#).expect("href regex is valid"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})").expect("date regex is valid"));

// ─────────────────────────────────────────────
// SearchHit
// ─────────────────────────────────────────────

/// One search result as returned by the provider.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub body: String,
    pub url: String,
    pub date: Option<String>,
}

/// Render hits as the numbered list the model summarises.
///
/// Each entry is `"<n>. <title> (<date>, <url>)\n   <body prefix>..."`.
pub fn format_hits(hits: &[SearchHit], snippet_chars: usize) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let date = hit.date.as_deref().unwrap_or("No date");
            let source = if hit.url.is_empty() {
                "Unknown source"
            } else {
                hit.url.as_str()
            };
            format!(
                "{}. {} ({}, {})\n   {}...",
                i + 1,
                hit.title,
                date,
                source,
                take_chars(&hit.body, snippet_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ─────────────────────────────────────────────
// WebSearchTool
// ─────────────────────────────────────────────

/// Searches the web through DuckDuckGo's HTML endpoint.
pub struct WebSearchTool {
    client: Client,
    api_base: String,
    max_results: usize,
    snippet_chars: usize,
}

impl WebSearchTool {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_base: config.api_base.clone(),
            max_results: config.max_results,
            snippet_chars: config.snippet_chars,
        }
    }

    /// Fetch and parse up to `max_results` hits for `query`.
    pub async fn search(&self, query: &str) -> anyhow::Result<Vec<SearchHit>> {
        debug!(query = %query, max_results = self.max_results, "searching web");

        let resp = self
            .client
            .get(&self.api_base)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("search request failed: {e}"))?;

        if !resp.status().is_success() {
            anyhow::bail!("search endpoint returned {}", resp.status());
        }

        let html = resp
            .text()
            .await
            .map_err(|e| anyhow::anyhow!("failed to read search response: {e}"))?;

        Ok(parse_results(&html, self.max_results))
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> ToolName {
        ToolName::WebSearch
    }

    async fn invoke(&self, argument: &str) -> String {
        match self.search(argument).await {
            Ok(hits) if hits.is_empty() => "No results found.".to_string(),
            Ok(hits) => format_hits(&hits, self.snippet_chars),
            Err(e) => {
                warn!(error = %e, "web search failed");
                format!("Web search error: {e}")
            }
        }
    }
}

// ─────────────────────────────────────────────
// HTML extraction
// ─────────────────────────────────────────────

/// Pull result blocks out of a DuckDuckGo HTML page, skipping ads.
fn parse_results(html: &str, limit: usize) -> Vec<SearchHit> {
    let links: Vec<_> = RESULT_LINK_RE.captures_iter(html).collect();
    let mut hits = Vec::new();

    for (i, link) in links.iter().enumerate() {
        if hits.len() >= limit {
            break;
        }

        // The block runs from this title link to the next one
        let (Some(whole), Some(attrs), Some(title)) = (link.get(0), link.get(1), link.get(2)) else {
            continue;
        };
        let block_end = links
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(html.len(), |m| m.start());
        let block = &html[whole.end()..block_end];

        let url = HREF_RE
            .captures(attrs.as_str())
            .and_then(|c| c.get(1))
            .map(|m| decode_result_url(m.as_str()))
            .unwrap_or_default();
        if url.contains(AD_REDIRECT) {
            continue;
        }

        let title = strip_html_tags(title.as_str());
        if title.is_empty() {
            continue;
        }

        let body = SNIPPET_RE
            .captures(block)
            .and_then(|c| c.get(1))
            .map(|m| strip_html_tags(m.as_str()))
            .unwrap_or_default();

        let date = EXTRAS_RE
            .captures(block)
            .and_then(|c| c.get(1))
            .and_then(|extras| DATE_RE.captures(extras.as_str()))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());

        hits.push(SearchHit {
            title,
            body,
            url,
            date,
        });
    }

    hits
}

/// Resolve DuckDuckGo's `/l/?uddg=<target>` redirect links to the target.
fn decode_result_url(href: &str) -> String {
    let href = decode_entities(href);
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        href
    };

    if let Ok(parsed) = Url::parse(&absolute) {
        if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
            return target.into_owned();
        }
    }
    absolute
}

/// Remove tags, decode entities, and collapse whitespace to single spaces.
fn strip_html_tags(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;

    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode the handful of entities DuckDuckGo emits.
fn decode_entities(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&#x2F;", "/")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
