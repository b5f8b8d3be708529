//! `get_current_weather` using the wttr.in JSON API.

use async_trait::async_trait;
use brain_core::{FunctionSpec, UnclassifiedName};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::HandlerError;
use crate::handler::{FunctionArgs, FunctionHandler};

const DEFAULT_BASE_URL: &str = "https://wttr.in";

/// Temperature unit requested by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureFormat {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
    format: TemperatureFormat,
}

/// Structured weather record returned to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature: f64,
    pub format: TemperatureFormat,
    pub description: String,
}

/// Fetches current conditions from wttr.in.
///
/// wttr.in is free and needs no API key. The `j1` format returns JSON with a
/// `current_condition` array whose first entry carries `temp_C`, `temp_F`
/// and `weatherDesc`.
pub struct CurrentWeather {
    client: reqwest::Client,
    base_url: String,
}

impl CurrentWeather {
    pub const NAME: &'static str = "get_current_weather";

    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the handler at another wttr.in-compatible endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        // wttr.in serves different content based on user agent
        let client = reqwest::Client::builder()
            .user_agent("curl/8.0.0")
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn spec() -> Result<FunctionSpec, UnclassifiedName> {
        FunctionSpec::new(
            Self::NAME,
            "Get the current weather",
            json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "The city and state, e.g. San Francisco, CA"
                    },
                    "format": {
                        "type": "string",
                        "enum": ["celsius", "fahrenheit"],
                        "description": "The temperature unit to use. Infer this from the users location."
                    }
                },
                "required": ["location", "format"]
            }),
        )
    }

    /// The location is encoded as a single path segment.
    fn request(&self, location: &str) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(location)
        );
        debug!("Fetching weather from: {}", url);

        self.client.get(url).query(&[("format", "j1")])
    }

    async fn fetch(&self, location: &str) -> Result<Value, HandlerError> {
        let response = self.request(location).send().await?;

        if !response.status().is_success() {
            return Err(HandlerError::Failed(format!(
                "weather API returned status {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

impl Default for CurrentWeather {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FunctionHandler for CurrentWeather {
    async fn call(&self, args: FunctionArgs) -> Result<Value, HandlerError> {
        let args: WeatherArgs = args.parse()?;
        if args.location.trim().is_empty() {
            return Err(HandlerError::InvalidArguments(
                "location must not be empty".to_string(),
            ));
        }

        let body = self.fetch(&args.location).await.map_err(|e| {
            warn!("Weather fetch failed: {}", e);
            e
        })?;

        let report = parse_report(&args.location, args.format, &body)?;
        serde_json::to_value(report).map_err(|e| HandlerError::Failed(e.to_string()))
    }
}

fn parse_report(
    location: &str,
    format: TemperatureFormat,
    body: &Value,
) -> Result<WeatherReport, HandlerError> {
    let current = body
        .get("current_condition")
        .and_then(|c| c.get(0))
        .ok_or_else(|| HandlerError::Failed(format!("no weather data for {}", location)))?;

    let key = match format {
        TemperatureFormat::Celsius => "temp_C",
        TemperatureFormat::Fahrenheit => "temp_F",
    };
    let temperature = current
        .get(key)
        .and_then(Value::as_str)
        .and_then(|t| t.parse::<f64>().ok())
        .ok_or_else(|| HandlerError::Failed(format!("missing {} in weather data", key)))?;

    let description = current
        .get("weatherDesc")
        .and_then(|d| d.get(0))
        .and_then(|d| d.get("value"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .trim()
        .to_string();

    Ok(WeatherReport {
        location: location.to_string(),
        temperature,
        format,
        description,
    })
}
