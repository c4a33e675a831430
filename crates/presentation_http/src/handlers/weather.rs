//! Forecast lookup handler

use axum::{
    Json,
    extract::{Query, State},
};
use domain::ForecastResult;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query string of `GET /weather`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherQuery {
    /// Free-form address, city, or ZIP code
    #[serde(default)]
    pub address: Option<String>,
}

/// Look up current conditions and a 5-day forecast for `address`
///
/// A missing parameter is treated like a blank one.
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<ForecastResult>, ApiError> {
    let address = query.address.unwrap_or_default();
    let result = state.forecast_service.lookup(&address).await?;
    Ok(Json(result))
}
