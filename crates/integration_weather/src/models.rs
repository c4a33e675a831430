//! OpenWeatherMap response models
//!
//! Only the fields the forecast pipeline reads are modelled; everything
//! else in the provider payload is ignored.

use serde::Deserialize;

/// Geographic coordinates as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

/// Temperature block (`main`) shared by current and forecast payloads
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MainReadings {
    /// Temperature at observation time
    pub temp: f64,
    /// Maximum temperature
    pub temp_max: f64,
    /// Minimum temperature
    pub temp_min: f64,
}

/// One entry of the `weather` array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Condition {
    /// Lower-case description, e.g. "light rain"
    #[serde(default)]
    pub description: String,
    /// Icon code, e.g. "10d"
    #[serde(default)]
    pub icon: String,
}

/// `sys` block of the current-conditions payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SystemInfo {
    /// ISO 3166 country code
    #[serde(default)]
    pub country: Option<String>,
}

/// `GET /data/2.5/weather` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeatherResponse {
    pub coord: Coordinates,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sys: SystemInfo,
}

/// One 3-hourly sample in the forecast list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastItem {
    /// Sample time as "YYYY-MM-DD HH:MM:SS" (UTC)
    pub dt_txt: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

/// `GET /data/2.5/forecast` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastResponse {
    /// Samples in chronological order
    #[serde(default)]
    pub list: Vec<ForecastItem>,
}

/// One match from `GET /geo/1.0/direct`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectGeocodeResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`
///
/// `cod` is a string on some endpoints and a number on others, so it is
/// not modelled; the HTTP status is authoritative.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
