//! Weather service port
//!
//! Defines the interface for current-conditions and forecast retrieval.
//! Temperatures are raw provider values in imperial units.

use async_trait::async_trait;
use domain::value_objects::{GeoLocation, ZipCode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// One weather condition as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSummary {
    /// Lower-case description, e.g. "scattered clouds"
    pub description: String,
    /// Icon code, e.g. "03d"
    pub icon: String,
}

/// Current conditions for a location
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentObservation {
    /// Coordinates of the observation, used for the forecast call
    pub location: GeoLocation,
    /// Place name reported by the provider
    pub name: String,
    /// ISO country code reported by the provider
    pub country: Option<String>,
    /// Current temperature
    pub temperature: f64,
    /// Today's high
    pub temperature_max: f64,
    /// Today's low
    pub temperature_min: f64,
    /// Conditions, primary first
    pub conditions: Vec<ConditionSummary>,
}

impl CurrentObservation {
    /// "<name>, <country>" as reported upstream, if a name is present
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(match self.country.as_deref().map(str::trim) {
            Some(country) if !country.is_empty() => format!("{name}, {country}"),
            _ => name.to_string(),
        })
    }
}

/// One 3-hourly forecast sample
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    /// Provider timestamp text, e.g. "2024-01-01 12:00:00"
    pub timestamp: String,
    /// Temperature at the sample time
    pub temperature: f64,
    /// High for the sample
    pub temperature_max: f64,
    /// Low for the sample
    pub temperature_min: f64,
    /// Conditions, primary first
    pub conditions: Vec<ConditionSummary>,
}

/// Port for weather service operations
///
/// Each call is a single upstream request. Implementations do not retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Current conditions for a US ZIP code
    ///
    /// A ZIP the provider does not know yields `ApplicationError::UpstreamRejected`.
    async fn current_by_zip(&self, zip: &ZipCode) -> Result<CurrentObservation, ApplicationError>;

    /// Current conditions for coordinates
    async fn current_by_coordinates(
        &self,
        location: &GeoLocation,
    ) -> Result<CurrentObservation, ApplicationError>;

    /// 5-day / 3-hour forecast samples in chronological order
    async fn forecast_by_coordinates(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<ForecastSample>, ApplicationError>;

    /// Check if the weather service is usable
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherPort) {}

    fn observation(name: &str, country: Option<&str>) -> CurrentObservation {
        CurrentObservation {
            location: GeoLocation::new(34.09, -118.41).unwrap(),
            name: name.to_string(),
            country: country.map(str::to_string),
            temperature: 72.5,
            temperature_max: 78.3,
            temperature_min: 65.1,
            conditions: vec![],
        }
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherPort>();
    }

    #[test]
    fn display_name_joins_name_and_country() {
        assert_eq!(
            observation("Beverly Hills", Some("US")).display_name(),
            Some("Beverly Hills, US".to_string())
        );
    }

    #[test]
    fn display_name_without_country() {
        assert_eq!(
            observation("Austin", None).display_name(),
            Some("Austin".to_string())
        );
        assert_eq!(
            observation("Austin", Some(" ")).display_name(),
            Some("Austin".to_string())
        );
    }

    #[test]
    fn display_name_requires_name() {
        assert_eq!(observation("  ", Some("US")).display_name(), None);
    }
}
