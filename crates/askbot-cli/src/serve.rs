//! `askbot serve` — the query form.
//!
//! One text field in, one answer out. Queries are answered strictly one at
//! a time, and nothing about a submission is kept once its page is sent.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use askbot_agent::ReasoningLoop;
use askbot_core::config::{Config, Credentials};

use crate::check;

const TITLE: &str = "ReAct Agent";
const SUBTITLE: &str = "Ask about general knowledge, weather, or recent news!";

/// Shared by all requests. The mutex serialises queries.
pub struct AppState {
    agent: Mutex<ReasoningLoop>,
}

/// The single form field.
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query: String,
}

/// `GET /` shows the empty form, `POST /` answers it.
pub fn router(agent: ReasoningLoop) -> Router {
    let state = Arc::new(AppState {
        agent: Mutex::new(agent),
    });
    Router::new()
        .route("/", get(show_form).post(answer_query))
        .with_state(state)
}

async fn show_form() -> Html<String> {
    Html(render_page("", ""))
}

async fn answer_query(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QueryForm>,
) -> Html<String> {
    let query = form.query.trim();
    if query.is_empty() {
        return Html(render_page("", ""));
    }

    let agent = state.agent.lock().await;
    info!(query_len = query.len(), "answering form query");
    let answer = agent.run(query).await;
    Html(render_page(query, &answer))
}

/// Start the form server. Backend probes run first; failures only warn.
pub async fn run(
    config: &Config,
    credentials: &Credentials,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let agent = crate::build_reasoning_loop(config, credentials)?;

    match check::probe_configured(config, credentials).await {
        Ok(reports) => check::log_reports(&reports),
        Err(e) => warn!(error = %e, "startup probes skipped"),
    }

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;

    info!(address = %format!("{host}:{port}"), "form server listening");
    println!("Serving {TITLE} on http://{host}:{port}/");

    axum::serve(listener, router(agent))
        .await
        .context("form server stopped")?;
    Ok(())
}

// ─────────────────────────────────────────────
// Page
// ─────────────────────────────────────────────

/// The whole page, with `query` echoed and `answer` in the response box.
fn render_page(query: &str, answer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{TITLE}</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
label {{ display: block; font-weight: 600; margin: 1rem 0 .25rem; }}
input, textarea {{ width: 100%; box-sizing: border-box; padding: .5rem; font: inherit; }}
button {{ margin-top: .75rem; padding: .5rem 1.5rem; font: inherit; }}
</style>
</head>
<body>
<h1>{TITLE}</h1>
<p>{SUBTITLE}</p>
<form method="post" action="/">
<label for="query">Enter your query</label>
<input id="query" name="query" type="text" placeholder="Type your question here..." value="{query}">
<button type="submit">Submit</button>
</form>
<label for="response">Response</label>
<textarea id="response" rows="10" readonly>{answer}</textarea>
</body>
</html>
"#,
        query = escape_html(query),
        answer = escape_html(answer),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
