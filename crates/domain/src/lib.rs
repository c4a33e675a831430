//! Domain layer for Forecaster
//!
//! Contains the location value objects, forecast entities, and the ZIP
//! extraction rules. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;
pub mod zip_extractor;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
pub use zip_extractor::extract_zip;
