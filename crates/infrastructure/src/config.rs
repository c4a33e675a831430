//! Application configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml` in the working directory, then `FORECASTER_*` environment
//! variables with `__` between nesting levels
//! (e.g. `FORECASTER_WEATHER__API_KEY`, `FORECASTER_SERVER__PORT`).

use std::{net::SocketAddr, time::Duration};

use integration_weather::{NominatimConfig, WeatherConfig};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

const ENV_PREFIX: &str = "FORECASTER";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Geocoding provider configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Forecast cache configuration
    #[serde(default)]
    pub cache: CacheAppConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow any)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_shutdown_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Which geocoding provider resolves free-form addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocodingProvider {
    /// OpenStreetMap Nominatim search (returns postal codes)
    #[default]
    Nominatim,
    /// OpenWeatherMap direct geocoding (coordinates only)
    OpenWeather,
    /// No geocoding; only ZIP codes in the text are recognized
    Disabled,
}

/// Geocoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Provider selection
    #[serde(default)]
    pub provider: GeocodingProvider,

    /// Nominatim base URL override
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,

    /// User-Agent sent to Nominatim
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Country code filter
    #[serde(default = "default_country_filter")]
    pub country_filter: String,
}

const fn default_geocoding_timeout() -> u64 {
    10
}

fn default_country_filter() -> String {
    "us".to_string()
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            provider: GeocodingProvider::default(),
            base_url: None,
            timeout_secs: default_geocoding_timeout(),
            user_agent: None,
            country_filter: default_country_filter(),
        }
    }
}

impl GeocodingAppConfig {
    /// Client configuration for the Nominatim provider
    #[must_use]
    pub fn nominatim(&self) -> NominatimConfig {
        let defaults = NominatimConfig::default();
        NominatimConfig {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            timeout_secs: self.timeout_secs,
            country_filter: self.country_filter.clone(),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            min_interval_ms: defaults.min_interval_ms,
        }
    }
}

/// Forecast cache configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheAppConfig {
    /// Freshness window for cached forecasts
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,

    /// Memory bound for the in-process cache
    #[serde(default = "default_max_capacity_mb")]
    pub max_capacity_mb: u64,
}

const fn default_ttl_minutes() -> u64 {
    30
}

const fn default_max_capacity_mb() -> u64 {
    64
}

impl Default for CacheAppConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
            max_capacity_mb: default_max_capacity_mb(),
        }
    }
}

impl CacheAppConfig {
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.saturating_mul(60))
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_sources(config::File::with_name("config").required(false))
    }

    fn from_sources<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins"),
            );

        builder.build()?.try_deserialize()
    }

    /// Whether a non-blank weather API key is present
    pub fn has_weather_api_key(&self) -> bool {
        self.weather
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}
