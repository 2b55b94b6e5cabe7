//! `askbot status` — show configuration and whether the secrets are set.
//!
//! Never prints a secret, only whether it is present.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use askbot_agent::ToolName;
use askbot_core::config::{get_config_path, Config, COMPLETION_KEY_ENV, WEATHER_KEY_ENV};

use crate::helpers::display_path;

/// Run the status command.
pub fn run(config: &Config) -> Result<()> {
    let config_path = get_config_path();

    println!();
    println!("{}", "🦀 Askbot Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        display_path(&config_path),
        match config_file_state(&config_path) {
            ConfigFileState::Valid => "✓".green().to_string(),
            ConfigFileState::Missing => "(not found, using defaults)".dimmed().to_string(),
            ConfigFileState::Invalid => "(unreadable, using defaults)".red().to_string(),
        }
    );

    println!("  {:<18} {}", "Model:".bold(), config.agent.model);
    println!("  {:<18} {}", "Endpoint:".bold(), config.provider.api_base);
    println!(
        "  {:<18} {} | {}",
        "Parameters:".bold(),
        format!("temp: {}", config.agent.temperature).dimmed(),
        format!("max_tokens: {}", config.agent.max_tokens).dimmed(),
    );
    println!(
        "  {:<18} {} | {}",
        "Loop:".bold(),
        format!("max iterations: {}", config.agent.max_iterations).dimmed(),
        format!("force final from: {}", config.agent.force_final_from).dimmed(),
    );

    println!();
    println!("  {}", "Secrets:".bold());
    for (label, env, set) in secret_rows(config) {
        let status = if set {
            format!("{} (set)", "✓".green())
        } else {
            format!("{} not set ({env})", "✗".red())
        };
        println!("    {:<20} {}", label, status);
    }

    println!();
    println!("  {}", "Tools:".bold());
    for (label, summary) in tool_rows() {
        println!("    {:<20} {}", label, summary.dimmed());
    }

    println!();
    println!(
        "  {:<18} {} (max {} results)",
        "Search endpoint:".bold(),
        config.tools.search.api_base,
        config.tools.search.max_results
    );
    println!(
        "  {:<18} {}:{}",
        "Form server:".bold(),
        config.server.host,
        config.server.port
    );
    println!();

    Ok(())
}

#[derive(Debug, PartialEq)]
enum ConfigFileState {
    Missing,
    Valid,
    Invalid,
}

/// Whether the config file exists and would be used as written.
fn config_file_state(path: &Path) -> ConfigFileState {
    if !path.exists() {
        return ConfigFileState::Missing;
    }
    let parsed = std::fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<Config>(&content).ok());
    match parsed {
        Some(_) => ConfigFileState::Valid,
        None => ConfigFileState::Invalid,
    }
}

/// `(label, summary)` for each tool the model may call.
fn tool_rows() -> Vec<(&'static str, &'static str)> {
    ToolName::ALL
        .iter()
        .map(|tool| (tool.label(), tool.summary()))
        .collect()
}

/// `(label, env var, is set)` for each required secret.
fn secret_rows(config: &Config) -> [(&'static str, &'static str, bool); 2] {
    [
        (
            "Completion API key",
            COMPLETION_KEY_ENV,
            config.provider.is_configured(),
        ),
        (
            "Weather API key",
            WEATHER_KEY_ENV,
            config.tools.weather.is_configured(),
        ),
    ]
}
