//! Ambient temperature lookup (OpenWeather).
//!
//! The temperature is an optional external signal: a missing API key, an
//! unknown city, or any network problem degrades to `None`, and the core
//! simply skips the thermal water-goal adjustment.

use crate::config::WeatherConfig;
use crate::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: Option<WeatherMain>,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: Option<f64>,
}

/// OpenWeather client for fetching the current temperature of a city
pub struct WeatherClient {
    api_key: Option<String>,
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.resolved_api_key(),
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    /// Current temperature in °C for `city`, or `None` when unavailable.
    ///
    /// Never fails: every problem is logged at warn level and reported as
    /// an absent value.
    pub fn fetch_temperature(&self, city: &str) -> Option<f64> {
        let api_key = self.api_key.as_deref()?;
        if city.trim().is_empty() {
            return None;
        }

        let response = match self
            .http
            .get(&self.endpoint)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Weather request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Weather API error ({}) for city {:?}", response.status(), city);
            return None;
        }

        let body: WeatherResponse = match response.json() {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to decode weather response: {}", e);
                return None;
            }
        };

        body.main.and_then(|main| main.temp)
    }
}
