//! OpenWeatherMap and Nominatim integration
//!
//! Clients for the OpenWeatherMap current-conditions, forecast, and direct
//! geocoding endpoints (<https://openweathermap.org/api>), plus a Nominatim
//! client for address search with postal codes.

pub mod client;
pub mod geocoding;
mod models;

pub use client::{OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError};
pub use geocoding::{GeocodingError, NominatimConfig, NominatimGeocodingClient, Place};
pub use models::{
    Condition, Coordinates, CurrentWeatherResponse, DirectGeocodeResult, ForecastItem,
    ForecastResponse, MainReadings, SystemInfo,
};
