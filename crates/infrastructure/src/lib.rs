//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the OpenWeatherMap
//! and geocoding adapters, the in-memory cache, configuration loading, and
//! logging setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use cache::{MokaCache, MokaCacheConfig};
pub use config::{AppConfig, CacheAppConfig, GeocodingAppConfig, GeocodingProvider, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
