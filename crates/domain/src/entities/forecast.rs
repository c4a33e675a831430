//! Forecast result entities
//!
//! `ForecastResult` is the unit handed back to callers and stored in the
//! cache. Temperatures are whole degrees in imperial units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at the resolved location
///
/// `high >= low` is not enforced; upstream values are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Current temperature
    #[serde(rename = "current_temp")]
    pub temperature: i64,
    /// Today's high
    #[serde(rename = "high_today")]
    pub high: i64,
    /// Today's low
    #[serde(rename = "low_today")]
    pub low: i64,
    /// Condition text with the first letter capitalized
    pub description: String,
    /// Provider icon code (e.g. "01d")
    pub icon: String,
}

/// One representative (noon) reading for a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    /// Full weekday name, e.g. "Monday"
    pub date: String,
    /// Abbreviated date, e.g. "Oct 28"
    pub short_date: String,
    /// Temperature at noon
    pub temp: i64,
    /// High for the sample
    pub high: i64,
    /// Low for the sample
    pub low: i64,
    /// Condition text with the first letter capitalized
    pub description: String,
    /// Provider icon code
    pub icon: String,
}

/// Current conditions plus up to five daily entries for one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Display name, e.g. "Beverly Hills, US"
    pub address: String,
    /// Current conditions, flattened into the top-level object
    #[serde(flatten)]
    pub current: CurrentConditions,
    /// Up to five daily entries in chronological order
    pub extended_forecast: Vec<DailyForecastEntry>,
    /// Whether this value was served from the cache
    pub from_cache: bool,
    /// When the upstream data was fetched
    pub cached_at: DateTime<Utc>,
}

impl ForecastResult {
    /// Maximum number of daily entries in a result
    pub const MAX_DAYS: usize = 5;

    /// Mark the result as served from (or not from) the cache
    #[must_use]
    pub fn with_from_cache(mut self, from_cache: bool) -> Self {
        self.from_cache = from_cache;
        self
    }
}
