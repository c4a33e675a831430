//! Application layer - Use cases and orchestration
//!
//! Contains the forecast lookup pipeline and the port definitions it depends on.
//! Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;
#[cfg(test)]
pub(crate) mod testing;

pub use error::{ApplicationError, LookupError};
pub use ports::*;
pub use services::*;
