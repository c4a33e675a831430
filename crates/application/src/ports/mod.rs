//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod cache_port;
mod clock;
mod geocoding_port;
mod weather_port;

pub use cache_port::{CachePort, CachePortExt, CacheStats, ttl};
pub use clock::{Clock, FixedClock, SystemClock};
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodingCandidate, GeocodingPort};
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::{ConditionSummary, CurrentObservation, ForecastSample, WeatherPort};
