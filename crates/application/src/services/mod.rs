//! Application services - Use case implementations

mod forecast_aggregator;
mod forecast_cache;
mod forecast_service;
mod geo_resolver;

pub use forecast_aggregator::{NOON_MARKER, aggregate, capitalize, round_temperature};
pub use forecast_cache::{ForecastCache, generate_cache_key};
pub use forecast_service::ForecastService;
pub use geo_resolver::GeoResolver;
