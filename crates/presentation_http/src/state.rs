//! Application state shared across handlers

use std::sync::Arc;

use application::ForecastService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Forecast lookup pipeline
    pub forecast_service: Arc<ForecastService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("forecast_service", &self.forecast_service)
            .finish_non_exhaustive()
    }
}
