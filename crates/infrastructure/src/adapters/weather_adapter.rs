//! Weather adapter - Implements WeatherPort using integration_weather

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{ConditionSummary, CurrentObservation, ForecastSample, WeatherPort},
};
use async_trait::async_trait;
use domain::value_objects::{GeoLocation, ZipCode};
use integration_weather::{
    Condition, CurrentWeatherResponse, ForecastItem, OpenWeatherClient, WeatherClient,
    WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for the OpenWeatherMap API
pub struct WeatherAdapter {
    client: Arc<OpenWeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenWeatherClient")
            .field("configured", &self.client.is_configured())
            .finish()
    }
}

impl WeatherAdapter {
    /// Wrap an existing client
    pub fn new(client: Arc<OpenWeatherClient>) -> Self {
        Self { client }
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::Upstream { status, message } => {
                ApplicationError::UpstreamRejected { status, message }
            },
            WeatherError::MissingApiKey => ApplicationError::Configuration(err.to_string()),
            WeatherError::ConnectionFailed(_)
            | WeatherError::Timeout
            | WeatherError::ParseError(_) => ApplicationError::ExternalService(err.to_string()),
        }
    }

    fn map_conditions(conditions: &[Condition]) -> Vec<ConditionSummary> {
        conditions
            .iter()
            .map(|c| ConditionSummary {
                description: c.description.clone(),
                icon: c.icon.clone(),
            })
            .collect()
    }

    fn map_current(current: CurrentWeatherResponse) -> Result<CurrentObservation, ApplicationError> {
        let location = GeoLocation::new(current.coord.lat, current.coord.lon)?;
        Ok(CurrentObservation {
            location,
            conditions: Self::map_conditions(&current.weather),
            name: current.name,
            country: current.sys.country,
            temperature: current.main.temp,
            temperature_max: current.main.temp_max,
            temperature_min: current.main.temp_min,
        })
    }

    fn map_sample(item: &ForecastItem) -> ForecastSample {
        ForecastSample {
            timestamp: item.dt_txt.clone(),
            temperature: item.main.temp,
            temperature_max: item.main.temp_max,
            temperature_min: item.main.temp_min,
            conditions: Self::map_conditions(&item.weather),
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(zip = %zip))]
    async fn current_by_zip(&self, zip: &ZipCode) -> Result<CurrentObservation, ApplicationError> {
        let current = self
            .client
            .current_by_zip(zip.as_str())
            .await
            .map_err(Self::map_error)?;
        debug!(name = %current.name, temp = current.main.temp, "Retrieved current weather");
        Self::map_current(current)
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn current_by_coordinates(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentObservation, ApplicationError> {
        let current = self
            .client
            .current_by_coordinates(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;
        debug!(name = %current.name, temp = current.main.temp, "Retrieved current weather");
        Self::map_current(current)
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn forecast_by_coordinates(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<ForecastSample>, ApplicationError> {
        let forecast = self
            .client
            .forecast(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;
        debug!(samples = forecast.list.len(), "Retrieved weather forecast");
        Ok(forecast.list.iter().map(Self::map_sample).collect())
    }

    async fn is_available(&self) -> bool {
        self.client.is_configured()
    }
}
