//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Text is not a 5-digit US ZIP code (optionally ZIP+4)
    #[error("Invalid ZIP code: {0}")]
    InvalidZipCode(String),

    /// Latitude/longitude out of range or not finite
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,
}
