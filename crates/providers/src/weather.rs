//! OpenWeatherMap adapter.
//!
//! Fetch-only: current conditions for a named location. Fields the
//! upstream response omits come back as `None` and render as "unknown";
//! a partial report is still a usable report.

use async_trait::async_trait;
use daybrief_core::error::ProviderError;
use daybrief_core::provider::WeatherProvider;
use daybrief_core::record::WeatherReport;
use serde::Deserialize;
use tracing::debug;

pub struct OpenWeatherProvider {
    base_url: String,
    api_key: String,
    units: String,
    client: reqwest::Client,
}

impl OpenWeatherProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        units: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("HTTP client build: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            units: units.into(),
            client,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &str) -> Result<WeatherReport, ProviderError> {
        debug!(%location, "Fetching current weather");

        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", &self.api_key),
                ("units", &self.units),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("weather network: {e}")))?;

        match response.status().as_u16() {
            200 => {}
            404 => return Err(ProviderError::NotFound(format!("location {location}"))),
            401 | 403 => {
                return Err(ProviderError::Unavailable(
                    "weather authentication failed".into(),
                ));
            }
            other => {
                return Err(ProviderError::Unavailable(format!(
                    "weather service returned status {other}"
                )));
            }
        }

        let payload: OwmResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("weather response: {e}")))?;

        Ok(payload.into_report(location))
    }
}

// --- OpenWeatherMap response shape (internal) ---

#[derive(Debug, Deserialize)]
struct OwmResponse {
    #[serde(default)]
    main: Option<OwmMain>,
    #[serde(default)]
    wind: Option<OwmWind>,
    #[serde(default)]
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<u32>,
    pressure: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: Option<String>,
}

impl OwmResponse {
    fn into_report(self, location: &str) -> WeatherReport {
        let main = self.main;
        WeatherReport {
            location: location.to_string(),
            temperature_c: main.as_ref().and_then(|m| m.temp),
            feels_like_c: main.as_ref().and_then(|m| m.feels_like),
            humidity_pct: main.as_ref().and_then(|m| m.humidity),
            wind_speed_ms: self.wind.and_then(|w| w.speed),
            conditions: self.weather.into_iter().next().and_then(|c| c.description),
            pressure_hpa: main.as_ref().and_then(|m| m.pressure),
        }
    }
}
