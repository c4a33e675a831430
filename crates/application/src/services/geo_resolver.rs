//! Location resolution
//!
//! Turns free-form text into a ZIP code or coordinates the weather provider
//! accepts.

use std::{fmt, sync::Arc};

use domain::{
    extract_zip,
    value_objects::{GeoLocation, LocationQuery, ResolvedLocation, ZipCode},
};
use tracing::{debug, instrument, warn};

use crate::ports::{GeocodingCandidate, GeocodingPort};

/// Resolves location queries, consulting the geocoder only when needed
pub struct GeoResolver {
    geocoder: Option<Arc<dyn GeocodingPort>>,
}

impl fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoResolver")
            .field("has_geocoder", &self.geocoder.is_some())
            .finish()
    }
}

impl GeoResolver {
    /// Resolver backed by a geocoding provider
    pub fn new(geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self {
            geocoder: Some(geocoder),
        }
    }

    /// Resolver that only extracts ZIP codes from the text itself
    pub fn without_geocoder() -> Self {
        Self { geocoder: None }
    }

    /// Resolve a query to a location
    ///
    /// Order of attempts:
    /// 1. the whole input is a ZIP or ZIP+4 (no network call)
    /// 2. the first geocoding candidate's postal code
    /// 3. the first 5-digit run in the raw text
    /// 4. the first geocoding candidate's coordinates
    ///
    /// Geocoder failures are logged and treated as "no candidates".
    #[instrument(skip(self, query), fields(query = %query.trimmed()))]
    pub async fn resolve(&self, query: &LocationQuery) -> Option<ResolvedLocation> {
        if query.is_blank() {
            return None;
        }

        if let Ok(zip) = ZipCode::parse(query.trimmed()) {
            debug!(zip = %zip, "Input is a ZIP code");
            return Some(ResolvedLocation::zip(zip));
        }

        let candidate = self.first_candidate(query.trimmed()).await;

        if let Some(candidate) = &candidate {
            if let Some(zip) = candidate.postal_code.as_deref().and_then(extract_zip) {
                debug!(zip = %zip, "Resolved ZIP from geocoder");
                return Some(ResolvedLocation::ZipCode {
                    zip,
                    label: candidate.label(),
                });
            }
        }

        if let Some(zip) = extract_zip(query.raw()) {
            debug!(zip = %zip, "Extracted ZIP from text");
            return Some(ResolvedLocation::zip(zip));
        }

        let candidate = candidate?;
        let location = coordinates(&candidate)?;
        debug!(location = %location, "Resolved coordinates from geocoder");
        Some(ResolvedLocation::Coordinates {
            location,
            label: candidate
                .label()
                .unwrap_or_else(|| query.trimmed().to_string()),
        })
    }

    async fn first_candidate(&self, text: &str) -> Option<GeocodingCandidate> {
        let geocoder = self.geocoder.as_ref()?;
        match geocoder.search(text).await {
            Ok(candidates) => candidates.into_iter().next(),
            Err(e) => {
                warn!(error = %e, "Geocoding failed, falling back to text extraction");
                None
            },
        }
    }
}

fn coordinates(candidate: &GeocodingCandidate) -> Option<GeoLocation> {
    let (lat, lon) = (candidate.latitude?, candidate.longitude?);
    GeoLocation::new(lat, lon).ok()
}
