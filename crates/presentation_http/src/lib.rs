//! Forecaster HTTP presentation layer
//!
//! Exposes the forecast lookup as `GET /weather?address=` along with
//! liveness and readiness probes.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
