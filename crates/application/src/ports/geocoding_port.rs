//! Geocoding port
//!
//! A single "search by free text" operation returning zero or more candidates.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A geocoding match; every field is optional because providers differ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodingCandidate {
    /// Postal code, if the provider knows one
    pub postal_code: Option<String>,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
    /// Town or place name
    pub name: Option<String>,
    /// State or region
    pub state: Option<String>,
    /// Country name or code
    pub country: Option<String>,
}

impl GeocodingCandidate {
    /// "name, state, country" from whichever parts are present
    #[must_use]
    pub fn label(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.name, &self.state, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref().map(str::trim))
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Port for free-text geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search for `text`, best match first
    ///
    /// Transport and provider failures are returned as
    /// `ApplicationError::ExternalService`; callers decide how to degrade.
    async fn search(&self, text: &str) -> Result<Vec<GeocodingCandidate>, ApplicationError>;
}
