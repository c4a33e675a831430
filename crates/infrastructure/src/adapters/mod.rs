//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_adapter;
mod weather_adapter;

pub use geocoding_adapter::{NominatimGeocodingAdapter, OpenWeatherGeocodingAdapter};
pub use weather_adapter::WeatherAdapter;
