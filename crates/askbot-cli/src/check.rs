//! `askbot check` — one request against each backend.
//!
//! `serve` runs the same probes at startup but only logs failures, since a
//! backend that is down now may be back by the first query.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{info, warn};

use askbot_agent::tools::weather::WeatherLookup;
use askbot_agent::{WeatherTool, WebSearchTool};
use askbot_core::config::{Config, Credentials};
use askbot_providers::{HttpProvider, LlmProvider};

const COMPLETION_PROBE: &str = "What is the capital of France?";
const WEATHER_PROBE: &str = "Bangalore";
const SEARCH_PROBE: &str = "latest AI chip news";

/// Result of probing one backend.
#[derive(Debug)]
pub struct ProbeReport {
    pub backend: &'static str,
    /// Short description of the success, or the error text.
    pub outcome: Result<String, String>,
}

impl ProbeReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Probe all three backends in turn.
pub async fn probe_backends(
    provider: &dyn LlmProvider,
    weather: &WeatherTool,
    search: &WebSearchTool,
) -> Vec<ProbeReport> {
    let completion = provider
        .complete(COMPLETION_PROBE)
        .await
        .map(|text| askbot_core::utils::truncate_string(&text, 80))
        .map_err(|e| e.to_string());

    let lookup = match weather.lookup(WEATHER_PROBE).await {
        Ok(WeatherLookup::Current { temp, condition }) => {
            Ok(format!("{WEATHER_PROBE}: {temp}{}, {condition}", weather.unit_symbol()))
        }
        Ok(WeatherLookup::Rejected(message)) => Err(message),
        Err(e) => Err(e.to_string()),
    };

    let hits = search
        .search(SEARCH_PROBE)
        .await
        .map(|hits| {
            hits.first()
                .map(|top| top.title.clone())
                .unwrap_or_else(|| "No results".to_string())
        })
        .map_err(|e| e.to_string());

    vec![
        ProbeReport {
            backend: "Completion",
            outcome: completion,
        },
        ProbeReport {
            backend: "Weather",
            outcome: lookup,
        },
        ProbeReport {
            backend: "Web Search",
            outcome: hits,
        },
    ]
}

/// Build fresh clients from `config` and probe them.
pub async fn probe_configured(config: &Config, credentials: &Credentials) -> Result<Vec<ProbeReport>> {
    let provider = HttpProvider::new(
        &config.provider,
        &config.agent,
        &credentials.completion_api_key,
    )
    .context("failed to create completion client")?;
    let weather = WeatherTool::new(&config.tools.weather, &credentials.weather_api_key);
    let search = WebSearchTool::new(&config.tools.search);

    Ok(probe_backends(&provider, &weather, &search).await)
}

/// Log probe results; failures are warnings.
pub fn log_reports(reports: &[ProbeReport]) {
    for report in reports {
        match &report.outcome {
            Ok(detail) => info!(backend = report.backend, detail = %detail, "backend reachable"),
            Err(e) => warn!(backend = report.backend, error = %e, "backend probe failed"),
        }
    }
}

/// Run the check command. Exits non-zero if any probe failed.
pub async fn run(config: &Config, credentials: &Credentials) -> Result<()> {
    let reports = probe_configured(config, credentials).await?;

    println!();
    for report in &reports {
        match &report.outcome {
            Ok(detail) => println!(
                "  {:<12} {} {}",
                report.backend.bold(),
                "✓".green(),
                detail.dimmed()
            ),
            Err(e) => println!("  {:<12} {} {}", report.backend.bold(), "✗".red(), e),
        }
    }
    println!();

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        anyhow::bail!("{failed} backend probe(s) failed");
    }
    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
