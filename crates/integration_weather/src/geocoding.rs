//! Nominatim geocoding client
//!
//! Free-text search against [Nominatim](https://nominatim.openstreetmap.org)
//! with address details, so matches carry a postal code when OSM has one.
//!
//! Requests are spaced at least `min_interval_ms` apart (Nominatim's usage
//! policy allows one request per second). Each caller reserves the next free
//! slot; a caller whose slot is further away than the request timeout fails
//! with [`GeocodingError::Timeout`] instead of queueing.

use std::{sync::Arc, time::Duration};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{sync::Mutex, time::Instant};
use tracing::{debug, instrument};

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Country code filter (e.g., "us"); empty disables filtering
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// User-Agent header; Nominatim rejects anonymous clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum spacing between requests in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_country_filter() -> String {
    "us".to_string()
}

fn default_user_agent() -> String {
    concat!("forecaster/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_min_interval_ms() -> u64 {
    1100
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            country_filter: default_country_filter(),
            user_agent: default_user_agent(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            min_interval_ms: 0,
            ..Default::default()
        }
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

/// A geocoding match
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub latitude: f64,
    pub longitude: f64,
    /// Postal code as OSM records it (may be ZIP+4 or a range)
    pub postcode: Option<String>,
    /// City, town, village, or hamlet, whichever is present
    pub locality: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub display_name: Option<String>,
}

/// Nominatim-based geocoding client with request spacing
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    /// Earliest instant the next request may be sent
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            next_slot: Arc::new(Mutex::new(None)),
        })
    }

    /// Reserve a request slot and wait for it
    ///
    /// The lock is only held while reserving, so concurrent callers sleep in
    /// parallel towards their own slots.
    async fn rate_limit(&self) -> Result<(), GeocodingError> {
        let interval = Duration::from_millis(self.config.min_interval_ms);
        let max_wait = Duration::from_secs(self.config.timeout_secs);

        let wait = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = next.map_or(now, |reserved| reserved.max(now));
            let wait = slot.saturating_duration_since(now);
            if wait > max_wait {
                debug!(?wait, "Geocoding request slot too far away");
                return Err(GeocodingError::Timeout);
            }
            *next = Some(slot + interval);
            wait
        };

        if !wait.is_zero() {
            debug!(?wait, "Rate limiting geocoding request");
            tokio::time::sleep(wait).await;
        }
        Ok(())
    }

    /// Search for free text, best match first
    ///
    /// An empty result is not an error. Matches with unparseable
    /// coordinates are dropped.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: u8) -> Result<Vec<Place>, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.rate_limit().await?;

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("addressdetails", "1".to_string()),
            ("limit", limit.max(1).to_string()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let places: Vec<Place> = results.into_iter().filter_map(NominatimResult::into_place).collect();
        debug!(matches = places.len(), "Geocoded query");
        Ok(places)
    }
}

/// Raw Nominatim API response
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    postcode: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    state: Option<String>,
    country_code: Option<String>,
}

impl NominatimResult {
    fn into_place(self) -> Option<Place> {
        let latitude = self.lat.parse().ok()?;
        let longitude = self.lon.parse().ok()?;
        let address = self.address.unwrap_or_default();

        Some(Place {
            latitude,
            longitude,
            postcode: address.postcode,
            locality: address
                .city
                .or(address.town)
                .or(address.village)
                .or(address.hamlet),
            state: address.state,
            country: address.country_code.map(|c| c.to_uppercase()),
            display_name: self.display_name,
        })
    }
}
