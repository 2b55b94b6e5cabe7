//! Weather tool — current conditions from OpenWeatherMap.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use askbot_core::config::WeatherConfig;

use super::base::{Tool, ToolName};

/// Message used when the provider rejects a lookup without saying why.
const DEFAULT_REJECTION: &str = "Unable to fetch weather";

/// What the provider said about a city.
#[derive(Clone, Debug, PartialEq)]
pub enum WeatherLookup {
    /// Current temperature (as sent by the provider) and condition text.
    Current { temp: String, condition: String },
    /// The provider answered with a non-200 `cod` and this message.
    Rejected(String),
}

/// Looks up current weather for a city.
pub struct WeatherTool {
    client: Client,
    api_base: String,
    api_key: String,
    units: String,
}

impl WeatherTool {
    pub fn new(config: &WeatherConfig, api_key: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_base: config.api_base.clone(),
            api_key: api_key.to_string(),
            units: config.units.clone(),
        }
    }

    fn weather_url(&self) -> String {
        format!("{}/data/2.5/weather", self.api_base.trim_end_matches('/'))
    }

    /// Query the provider for `city`.
    ///
    /// The body is read whatever the HTTP status: OpenWeatherMap reports
    /// unknown cities and bad keys as JSON with a `cod` and a `message`.
    pub async fn lookup(&self, city: &str) -> anyhow::Result<WeatherLookup> {
        debug!(city = %city, "checking weather");

        let resp = self
            .client
            .get(self.weather_url())
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("weather request failed: {e}"))?;

        let body: Value = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("failed to parse weather response: {e}"))?;

        parse_lookup(&body)
    }

    /// Symbol for the configured units (°C unless configured otherwise).
    pub fn unit_symbol(&self) -> &'static str {
        match self.units.as_str() {
            "imperial" => "°F",
            "standard" => "K",
            _ => "°C",
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> ToolName {
        ToolName::Weather
    }

    async fn invoke(&self, argument: &str) -> String {
        match self.lookup(argument).await {
            Ok(WeatherLookup::Current { temp, condition }) => {
                format!("It's {temp}{} and {condition} in {argument}.", self.unit_symbol())
            }
            Ok(WeatherLookup::Rejected(message)) => format!("Error: {message}"),
            Err(e) => {
                warn!(city = %argument, error = %e, "weather check failed");
                format!("Weather check error: {e}")
            }
        }
    }
}

/// Interpret an OpenWeatherMap current-weather body.
fn parse_lookup(body: &Value) -> anyhow::Result<WeatherLookup> {
    let cod = match &body["cod"] {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    if cod != Some(200) {
        let message = body["message"].as_str().unwrap_or(DEFAULT_REJECTION);
        return Ok(WeatherLookup::Rejected(message.to_string()));
    }

    let temp = match &body["main"]["temp"] {
        Value::Number(n) => n.to_string(),
        _ => anyhow::bail!("malformed response: missing main.temp"),
    };
    let condition = body["weather"][0]["description"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("malformed response: missing weather[0].description"))?;

    Ok(WeatherLookup::Current {
        temp,
        condition: condition.to_string(),
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(base: &str) -> WeatherTool {
        WeatherTool::new(
            &WeatherConfig {
                api_base: base.to_string(),
                ..Default::default()
            },
            "owm-key",
        )
    }

    async fn server_returning(status: u16, body: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    // ── Body interpretation ──

    #[test]
    fn test_parse_success() {
        let body = json!({"cod": 200, "main": {"temp": 18.5}, "weather": [{"description": "light rain"}]});
        assert_eq!(
            parse_lookup(&body).unwrap(),
            WeatherLookup::Current {
                temp: "18.5".into(),
                condition: "light rain".into()
            }
        );
    }

    #[test]
    fn test_parse_string_cod() {
        let body = json!({"cod": "404", "message": "city not found"});
        assert_eq!(
            parse_lookup(&body).unwrap(),
            WeatherLookup::Rejected("city not found".into())
        );
    }

    #[test]
    fn test_parse_rejection_without_message() {
        let body = json!({"cod": 500});
        assert_eq!(
            parse_lookup(&body).unwrap(),
            WeatherLookup::Rejected("Unable to fetch weather".into())
        );
    }

    #[test]
    fn test_parse_empty_message_kept() {
        let body = json!({"cod": "400", "message": ""});
        assert_eq!(parse_lookup(&body).unwrap(), WeatherLookup::Rejected(String::new()));
    }

    #[test]
    fn test_parse_missing_fields() {
        let body = json!({"cod": 200, "weather": [{"description": "clear sky"}]});
        assert!(parse_lookup(&body).is_err());

        let body = json!({"cod": 200, "main": {"temp": 3}});
        assert!(parse_lookup(&body).is_err());
    }

    // ── Tool boundary ──

    #[tokio::test]
    async fn test_invoke_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("appid", "owm-key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": 200,
                "main": { "temp": 18.5 },
                "weather": [{ "description": "light rain" }]
            })))
            .mount(&server)
            .await;

        let tool = tool_for(&server.uri());
        assert_eq!(tool.invoke("Paris").await, "It's 18.5°C and light rain in Paris.");
    }

    #[tokio::test]
    async fn test_invoke_integer_temperature() {
        let server = server_returning(
            200,
            json!({"cod": 200, "main": {"temp": 20}, "weather": [{"description": "clear sky"}]}),
        )
        .await;

        let tool = tool_for(&server.uri());
        assert_eq!(tool.invoke("Bangalore").await, "It's 20°C and clear sky in Bangalore.");
    }

    #[tokio::test]
    async fn test_invoke_city_not_found() {
        let server = server_returning(404, json!({"cod": "404", "message": "city not found"})).await;

        let tool = tool_for(&server.uri());
        assert_eq!(tool.invoke("Atlantis").await, "Error: city not found");
    }

    #[tokio::test]
    async fn test_invoke_bad_key() {
        let server = server_returning(
            401,
            json!({"cod": 401, "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."}),
        )
        .await;

        let tool = tool_for(&server.uri());
        assert!(tool.invoke("Paris").await.starts_with("Error: Invalid API key."));
    }

    #[tokio::test]
    async fn test_invoke_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let tool = tool_for(&server.uri());
        assert!(tool.invoke("Paris").await.starts_with("Weather check error: "));
    }

    #[tokio::test]
    async fn test_invoke_network_error() {
        let tool = tool_for("http://127.0.0.1:1");
        assert!(tool.invoke("Paris").await.starts_with("Weather check error: "));
    }

    #[tokio::test]
    async fn test_invoke_is_deterministic() {
        let server = server_returning(
            200,
            json!({"cod": 200, "main": {"temp": 7.25}, "weather": [{"description": "mist"}]}),
        )
        .await;

        let tool = tool_for(&server.uri());
        let first = tool.invoke("Oslo").await;
        let second = tool.invoke("Oslo").await;
        assert_eq!(first, "It's 7.25°C and mist in Oslo.");
        assert_eq!(first, second);
    }

    #[test]
    fn test_weather_url() {
        assert_eq!(
            tool_for("http://api.openweathermap.org/").weather_url(),
            "http://api.openweathermap.org/data/2.5/weather"
        );
    }
}
