//! Outcome of resolving a location query

use std::fmt;

use super::{GeoLocation, ZipCode};

/// A location the weather provider can be queried for
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLocation {
    /// A US ZIP code, with an optional human-readable label from geocoding
    ZipCode {
        /// The 5-digit ZIP code
        zip: ZipCode,
        /// Display name such as "Beverly Hills, California, US"
        label: Option<String>,
    },
    /// Coordinates from a geocoding candidate that had no usable postal code
    Coordinates {
        /// Validated coordinates
        location: GeoLocation,
        /// Display name built from the candidate's name/state/country
        label: String,
    },
}

impl ResolvedLocation {
    /// A ZIP code without a display label
    #[must_use]
    pub const fn zip(zip: ZipCode) -> Self {
        Self::ZipCode { zip, label: None }
    }

    /// The display label, if one is known before fetching weather
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::ZipCode { label, .. } => label.as_deref(),
            Self::Coordinates { label, .. } => Some(label),
        }
    }

    /// The ZIP code, when this location is one
    #[must_use]
    pub const fn as_zip(&self) -> Option<&ZipCode> {
        match self {
            Self::ZipCode { zip, .. } => Some(zip),
            Self::Coordinates { .. } => None,
        }
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZipCode { zip, .. } => write!(f, "zip {zip}"),
            Self::Coordinates { location, .. } => write!(f, "coordinates {location}"),
        }
    }
}
