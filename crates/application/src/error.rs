//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors returned by ports and adapters
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service could not be reached or returned an unreadable body
    #[error("External service error: {0}")]
    ExternalService(String),

    /// External service answered with a non-success HTTP status
    #[error("Upstream rejected request ({status}): {message}")]
    UpstreamRejected {
        /// HTTP status code
        status: u16,
        /// Message from the upstream error body, or a generic one
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Terminal failure of a single forecast lookup
///
/// `Display` is the message shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The submitted text was empty or whitespace
    #[error("Please enter an address")]
    EmptyInput,

    /// Neither the text nor the geocoder produced a location
    #[error("No valid ZIP code found")]
    NoLocationFound,

    /// The weather provider did not recognize the ZIP code
    #[error("Invalid ZIP code: {0}")]
    InvalidZip(String),

    /// The weather provider failed or timed out
    #[error("Weather service unavailable")]
    UpstreamUnavailable,
}

impl LookupError {
    /// Stable machine-readable code
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::NoLocationFound => "no_location_found",
            Self::InvalidZip(_) => "invalid_zip",
            Self::UpstreamUnavailable => "upstream_unavailable",
        }
    }
}
