//! Askbot CLI — entry point.
//!
//! # Commands
//!
//! - `askbot serve [--host H] [--port P]` — HTML form: one query in, one answer out
//! - `askbot ask "<query>"` — answer a single query and exit
//! - `askbot chat` — interactive REPL, every line answered independently
//! - `askbot status` — show configuration and whether the secrets are set
//! - `askbot check` — probe the completion, weather and search backends

mod check;
mod helpers;
mod repl;
mod serve;
mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use askbot_agent::{ReasoningLoop, Toolbox, WeatherTool, WebSearchTool};
use askbot_core::config::{load_config, load_dotenv, Config, Credentials};
use askbot_providers::HttpProvider;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Askbot — answers questions directly or with one web search / weather lookup
#[derive(Parser)]
#[command(name = "askbot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the query form over HTTP
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Answer a single query
    Ask {
        /// The question to answer
        query: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Interactive REPL (no memory between lines)
    Chat {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and secret status
    Status,

    /// Probe every backend once
    Check {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, logs } => {
            init_logging(logs, true);
            let (config, credentials) = load_runtime()?;
            serve::run(&config, &credentials, host, port).await
        }
        Commands::Ask { query, logs } => {
            init_logging(logs, false);
            let (config, credentials) = load_runtime()?;
            let agent = build_reasoning_loop(&config, &credentials)?;
            helpers::print_response(&agent.run(&query).await);
            Ok(())
        }
        Commands::Chat { logs } => {
            init_logging(logs, false);
            let (config, credentials) = load_runtime()?;
            let agent = build_reasoning_loop(&config, &credentials)?;
            repl::run(agent).await
        }
        Commands::Status => {
            init_logging(false, false);
            load_dotenv();
            status::run(&load_config(None))
        }
        Commands::Check { logs } => {
            init_logging(logs, false);
            let (config, credentials) = load_runtime()?;
            check::run(&config, &credentials).await
        }
    }
}

/// Load `.env` and the config file, then resolve both required secrets.
///
/// A missing secret is reported here, once, before any query runs.
fn load_runtime() -> Result<(Config, Credentials)> {
    load_dotenv();
    let config = load_config(None);
    let credentials = Credentials::from_config(&config).context("initialization failed")?;
    Ok((config, credentials))
}

/// Build a `ReasoningLoop` from the loaded configuration.
pub fn build_reasoning_loop(config: &Config, credentials: &Credentials) -> Result<ReasoningLoop> {
    let provider = HttpProvider::new(
        &config.provider,
        &config.agent,
        &credentials.completion_api_key,
    )
    .context("failed to create completion client")?;

    let tools = Toolbox::new(
        Arc::new(WebSearchTool::new(&config.tools.search)),
        Arc::new(WeatherTool::new(
            &config.tools.weather,
            &credentials.weather_api_key,
        )),
    );

    info!(
        model = %config.agent.model,
        max_iterations = config.agent.max_iterations,
        force_final_from = config.agent.force_final_from,
        "reasoning loop ready"
    );

    Ok(ReasoningLoop::new(Arc::new(provider), tools)
        .with_max_iterations(config.agent.max_iterations)
        .with_force_final_from(config.agent.force_final_from))
}

/// Initialize tracing/logging.
///
/// With `respect_env`, a set `RUST_LOG` replaces the flag-derived filter.
fn init_logging(verbose: bool, respect_env: bool) {
    use tracing_subscriber::EnvFilter;

    let fallback = if verbose {
        EnvFilter::new("askbot=debug,info")
    } else {
        EnvFilter::new("warn")
    };
    let filter = if respect_env {
        EnvFilter::try_from_default_env().unwrap_or(fallback)
    } else {
        fallback
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
