//! Domain entities

mod forecast;

pub use forecast::{CurrentConditions, DailyForecastEntry, ForecastResult};
