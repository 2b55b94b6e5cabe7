//! Utility helpers — path resolution and string manipulation.

use std::path::PathBuf;

/// Get the Askbot data directory (e.g. `~/.askbot/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".askbot")
}

/// First `n` characters of `s`. Unicode-safe.
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", take_chars(s, max_len.saturating_sub(3)))
    }
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_short() {
        assert_eq!(take_chars("hello", 10), "hello");
    }

    #[test]
    fn test_take_chars_cuts() {
        assert_eq!(take_chars("hello world", 5), "hello");
    }

    #[test]
    fn test_take_chars_unicode() {
        assert_eq!(take_chars("こんにちは世界", 3), "こんに");
        assert_eq!(take_chars("20°C today", 3), "20°");
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate_string("hello world, this is a long string", 15);
        assert_eq!(result, "hello world,...");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate_string("こんにちは世界です", 5), "こん...");
    }

    #[test]
    fn test_data_path_ends_with_askbot() {
        assert!(get_data_path().ends_with(".askbot"));
    }
}
