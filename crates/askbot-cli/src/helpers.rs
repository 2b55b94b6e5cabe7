//! Shared CLI helpers — response printing, banner, path display.

use std::path::Path;

use colored::Colorize;

/// Print an answer to stdout.
pub fn print_response(response: &str) {
    println!();
    println!("{}", "🦀 Askbot".cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🦀 Askbot".cyan().bold(), version.dimmed());
    println!(
        "{}",
        "Ask about general knowledge, weather, or recent news! Type \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder while the loop runs.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

/// Render `path` with the home directory shortened to `~`.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs_next::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            return Path::new("~").join(rest).display().to_string();
        }
    }
    path.display().to_string()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn display_path_under_home() {
        let Some(home) = dirs_next::home_dir() else {
            return;
        };
        let shown = display_path(&home.join(".askbot").join("config.json"));
        assert!(shown.starts_with('~'));
        assert!(shown.ends_with("config.json"));
    }

    #[test]
    fn display_path_outside_home() {
        let path = PathBuf::from("/definitely/not/home/config.json");
        assert_eq!(display_path(&path), "/definitely/not/home/config.json");
    }
}
