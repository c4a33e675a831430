//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub weather: WeatherStatus,
    pub cache: CacheStatus,
}

/// Status of the weather provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherStatus {
    /// Whether an API key is configured
    pub configured: bool,
}

/// Forecast cache counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatus {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
    pub hit_rate: f64,
}

/// Readiness check - can the server answer lookups?
///
/// Without a weather API key every lookup would fail, so the server
/// reports 503 until one is configured.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let configured = state.forecast_service.is_weather_available().await;
    let stats = state.forecast_service.cache_stats();

    let status_code = if configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: configured,
            weather: WeatherStatus { configured },
            cache: CacheStatus {
                hits: stats.hits,
                misses: stats.misses,
                entries: stats.entries,
                hit_rate: stats.hit_rate(),
            },
        }),
    )
}
