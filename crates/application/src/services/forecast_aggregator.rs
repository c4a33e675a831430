//! Forecast aggregation
//!
//! Combines a current-conditions observation and a 3-hourly forecast list
//! into a `ForecastResult`, keeping one noon sample per day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use domain::entities::{CurrentConditions, DailyForecastEntry, ForecastResult};
use tracing::warn;

use crate::ports::{ConditionSummary, CurrentObservation, ForecastSample};

/// Timestamp text that marks a day's representative sample
pub const NOON_MARKER: &str = "12:00:00";

/// Round half away from zero to a whole degree
///
/// Non-finite input maps to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_temperature(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}

/// Upper-case the first character and lower-case the rest
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

fn primary(conditions: &[ConditionSummary]) -> (String, String) {
    conditions.first().map_or_else(
        || (String::new(), String::new()),
        |c| (capitalize(&c.description), c.icon.clone()),
    )
}

fn sample_date(timestamp: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .ok()
        .or_else(|| {
            timestamp
                .get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        })
}

fn daily_entry(sample: &ForecastSample) -> Option<DailyForecastEntry> {
    let Some(date) = sample_date(&sample.timestamp) else {
        warn!(timestamp = %sample.timestamp, "Skipping forecast sample with unreadable timestamp");
        return None;
    };
    let (description, icon) = primary(&sample.conditions);

    Some(DailyForecastEntry {
        date: date.format("%A").to_string(),
        short_date: date.format("%b %d").to_string(),
        temp: round_temperature(sample.temperature),
        high: round_temperature(sample.temperature_max),
        low: round_temperature(sample.temperature_min),
        description,
        icon,
    })
}

/// Build the canonical result for a fresh fetch
///
/// `fetched_at` becomes `cached_at`; `from_cache` is always false here.
/// Fewer than five noon samples simply yields a shorter list.
#[must_use]
pub fn aggregate(
    current: &CurrentObservation,
    forecast: &[ForecastSample],
    display_name: &str,
    fetched_at: DateTime<Utc>,
) -> ForecastResult {
    let (description, icon) = primary(&current.conditions);

    let extended_forecast = forecast
        .iter()
        .filter(|s| s.timestamp.contains(NOON_MARKER))
        .filter_map(daily_entry)
        .take(ForecastResult::MAX_DAYS)
        .collect();

    ForecastResult {
        address: display_name.to_string(),
        current: CurrentConditions {
            temperature: round_temperature(current.temperature),
            high: round_temperature(current.temperature_max),
            low: round_temperature(current.temperature_min),
            description,
            icon,
        },
        extended_forecast,
        from_cache: false,
        cached_at: fetched_at,
    }
}
