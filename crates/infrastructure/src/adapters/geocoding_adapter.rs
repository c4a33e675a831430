//! Geocoding adapters - Implement GeocodingPort
//!
//! `NominatimGeocodingAdapter` returns postal codes; `OpenWeatherGeocodingAdapter`
//! uses the weather provider's direct geocoding, which only has coordinates.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{GeocodingCandidate, GeocodingPort},
};
use async_trait::async_trait;
use integration_weather::{
    DirectGeocodeResult, GeocodingError, NominatimConfig, NominatimGeocodingClient,
    OpenWeatherClient, Place, WeatherClient,
};
use tracing::{debug, instrument};

/// Only the best match is consulted
const RESULT_LIMIT: u8 = 1;

/// Geocoding adapter backed by Nominatim
#[derive(Debug)]
pub struct NominatimGeocodingAdapter {
    client: NominatimGeocodingClient,
}

impl NominatimGeocodingAdapter {
    /// Create an adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    fn map_error(err: GeocodingError) -> ApplicationError {
        ApplicationError::ExternalService(err.to_string())
    }

    fn map_place(place: Place) -> GeocodingCandidate {
        GeocodingCandidate {
            postal_code: place.postcode,
            latitude: Some(place.latitude),
            longitude: Some(place.longitude),
            name: place.locality,
            state: place.state,
            country: place.country,
        }
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<Vec<GeocodingCandidate>, ApplicationError> {
        let places = self
            .client
            .search(text, RESULT_LIMIT)
            .await
            .map_err(Self::map_error)?;
        debug!(matches = places.len(), "Nominatim search complete");
        Ok(places.into_iter().map(Self::map_place).collect())
    }
}

/// Geocoding adapter backed by OpenWeatherMap direct geocoding
pub struct OpenWeatherGeocodingAdapter {
    client: Arc<OpenWeatherClient>,
}

impl std::fmt::Debug for OpenWeatherGeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherGeocodingAdapter")
            .finish_non_exhaustive()
    }
}

impl OpenWeatherGeocodingAdapter {
    /// Share a client with the weather adapter
    pub fn new(client: Arc<OpenWeatherClient>) -> Self {
        Self { client }
    }

    fn map_result(result: DirectGeocodeResult) -> GeocodingCandidate {
        GeocodingCandidate {
            postal_code: None,
            latitude: Some(result.lat),
            longitude: Some(result.lon),
            name: Some(result.name),
            state: result.state,
            country: result.country,
        }
    }
}

#[async_trait]
impl GeocodingPort for OpenWeatherGeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<Vec<GeocodingCandidate>, ApplicationError> {
        let results = self
            .client
            .geocode_direct(text, RESULT_LIMIT)
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))?;
        debug!(matches = results.len(), "Direct geocoding complete");
        Ok(results.into_iter().map(Self::map_result).collect())
    }
}
