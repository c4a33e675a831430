//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod location_query;
mod resolved_location;
mod zip_code;

pub use geo_location::GeoLocation;
pub use location_query::LocationQuery;
pub use resolved_location::ResolvedLocation;
pub use zip_code::ZipCode;
