//! Required secrets, resolved once at startup.

use super::error::ConfigError;
use super::schema::Config;

/// Env var holding the completion-service key.
pub const COMPLETION_KEY_ENV: &str = "GROQ_API_KEY";

/// Env var holding the weather-service key.
pub const WEATHER_KEY_ENV: &str = "WEATHER_API_KEY";

/// The two secrets every loop-running command needs.
///
/// Built from an already-loaded [`Config`] (env overrides applied), then
/// handed to the completion client and the weather tool at construction.
#[derive(Clone)]
pub struct Credentials {
    pub completion_api_key: String,
    pub weather_api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("completion_api_key", &"<redacted>")
            .field("weather_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Resolve both secrets, failing on the first one that is missing.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        if !config.provider.is_configured() {
            return Err(ConfigError::MissingCredential {
                name: "completion service API key",
                env: COMPLETION_KEY_ENV,
            });
        }
        if !config.tools.weather.is_configured() {
            return Err(ConfigError::MissingCredential {
                name: "weather service API key",
                env: WEATHER_KEY_ENV,
            });
        }

        Ok(Self {
            completion_api_key: config.provider.api_key.clone(),
            weather_api_key: config.tools.weather.api_key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(completion: &str, weather: &str) -> Config {
        let mut config = Config::default();
        config.provider.api_key = completion.to_string();
        config.tools.weather.api_key = weather.to_string();
        config
    }

    #[test]
    fn test_both_present() {
        let creds = Credentials::from_config(&config_with("gsk-1", "owm-2")).unwrap();
        assert_eq!(creds.completion_api_key, "gsk-1");
        assert_eq!(creds.weather_api_key, "owm-2");
    }

    #[test]
    fn test_missing_completion_key() {
        let err = Credentials::from_config(&config_with("", "owm-2")).unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_missing_weather_key() {
        let err = Credentials::from_config(&config_with("gsk-1", "")).unwrap_err();
        assert!(err.to_string().contains("WEATHER_API_KEY"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::from_config(&config_with("gsk-secret", "owm-secret")).unwrap();
        let shown = format!("{creds:?}");
        assert!(!shown.contains("gsk-secret"));
        assert!(!shown.contains("owm-secret"));
    }
}
