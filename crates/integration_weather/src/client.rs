//! OpenWeatherMap client
//!
//! HTTP client for the current-conditions, 5-day forecast, and direct
//! geocoding endpoints. One request per call, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{
    CurrentWeatherResponse, DirectGeocodeResult, ErrorBody, ForecastResponse,
};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request exceeded the configured timeout
    #[error("Weather request timed out")]
    Timeout,

    /// The provider answered with a non-success status
    #[error("Weather service returned {status}: {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Provider message, or a generic one if the body had none
        message: String,
    },

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No API key configured
    #[error("Weather API key is not configured")]
    MissingApiKey,
}

impl WeatherError {
    /// HTTP status of an upstream rejection, if this is one
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `appid`
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Unit system passed as `units` (default: imperial)
    #[serde(default = "default_units")]
    pub units: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_units() -> String {
    "imperial".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            units: default_units(),
            timeout_secs: default_timeout(),
        }
    }
}

impl WeatherConfig {
    /// Default configuration with an API key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Current conditions for a US ZIP code
    async fn current_by_zip(&self, zip: &str) -> Result<CurrentWeatherResponse, WeatherError>;

    /// Current conditions for coordinates
    async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeatherResponse, WeatherError>;

    /// 5-day / 3-hour forecast for coordinates
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, WeatherError>;

    /// Direct geocoding: best matches for free text
    async fn geocode_direct(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<DirectGeocodeResult>, WeatherError>;

    /// Whether the client has what it needs to issue requests
    fn is_configured(&self) -> bool;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.config
            .api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::MissingApiKey)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issue a GET and decode the JSON body
    ///
    /// `params` must not contain the API key; it is appended here so that
    /// the logged parameters never include it.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key()?;
        let url = self.endpoint(path);
        debug!(url = %url, ?params, "Requesting weather API");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", api_key)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeatherError::Timeout
                } else {
                    WeatherError::ConnectionFailed(e.without_url().to_string())
                }
            })?;

        let response = Self::check_status(response).await?;

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                WeatherError::Timeout
            } else {
                WeatherError::ParseError(e.without_url().to_string())
            }
        })
    }

    async fn check_status(response: Response) -> Result<Response, WeatherError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|body| body.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Weather service unavailable".to_string());

        warn!(status = status.as_u16(), %message, "Weather API returned an error");
        Err(WeatherError::Upstream {
            status: status.as_u16(),
            message,
        })
    }

    fn coordinate_params(&self, latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("units", self.config.units.clone()),
        ]
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_by_zip(&self, zip: &str) -> Result<CurrentWeatherResponse, WeatherError> {
        let params = [
            ("zip", format!("{zip},us")),
            ("units", self.config.units.clone()),
        ];
        self.get_json("/data/2.5/weather", &params).await
    }

    #[instrument(skip(self))]
    async fn current_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeatherResponse, WeatherError> {
        let params = self.coordinate_params(latitude, longitude);
        self.get_json("/data/2.5/weather", &params).await
    }

    #[instrument(skip(self))]
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResponse, WeatherError> {
        let params = self.coordinate_params(latitude, longitude);
        self.get_json("/data/2.5/forecast", &params).await
    }

    #[instrument(skip(self))]
    async fn geocode_direct(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<DirectGeocodeResult>, WeatherError> {
        let params = [("q", query.to_string()), ("limit", limit.max(1).to_string())];
        self.get_json("/geo/1.0/direct", &params).await
    }

    fn is_configured(&self) -> bool {
        self.api_key().is_ok()
    }
}
