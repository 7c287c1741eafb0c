use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    code::WeatherCode,
    config::Config,
    error::LookupError,
    model::{CurrentConditions, Place},
};

use super::{ForecastProvider, Geocoder};

const CURRENT_FIELDS: &str = "temperature_2m,weather_code";

/// Client for the Open-Meteo geocoding and forecast APIs. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
}

impl OpenMeteoClient {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            language: config.language.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    #[serde(default)]
    results: Option<Vec<Place>>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    #[serde(default)]
    weather_code: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn search(&self, name: &str) -> Result<Vec<Place>, LookupError> {
        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("name", name),
                ("language", self.language.as_str()),
                ("count", "1"),
            ])
            .send()
            .await?;

        let parsed: OmGeocodingResponse = read_json(res, "geocoding").await?;
        let places = parsed.results.unwrap_or_default();
        debug!(candidates = places.len(), "geocoding answered");
        Ok(places)
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, LookupError> {
        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
            ])
            .send()
            .await?;

        let parsed: OmForecastResponse = read_json(res, "forecast").await?;
        let weather_code =
            weather_code_from_raw(parsed.current.weather_code.as_ref().and_then(numeric_code));

        Ok(CurrentConditions {
            temperature_c: parsed.current.temperature_2m,
            weather_code,
        })
    }
}

async fn read_json<T: DeserializeOwned>(res: Response, what: &str) -> Result<T, LookupError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        debug!(%status, body = %truncate_body(&body), "{what} request failed");
        return Err(LookupError::Status { status });
    }

    serde_json::from_str(&body)
        .map_err(|e| LookupError::Malformed(format!("Failed to parse {what} JSON: {e}")))
}

/// Numbers, and strings holding a number; anything else is unusable.
fn numeric_code(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn weather_code_from_raw(raw: Option<f64>) -> WeatherCode {
    match raw {
        Some(v) if v.fract() == 0.0 => WeatherCode::from_code(v as i64),
        other => {
            debug!(raw = ?other, "unusable weather code, using clear sky");
            WeatherCode::default()
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
