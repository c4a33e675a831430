//! In-memory port doubles shared by the service tests

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use domain::value_objects::{GeoLocation, ZipCode};
use parking_lot::Mutex;

use crate::{
    error::ApplicationError,
    ports::{
        CachePort, CacheStats, ConditionSummary, CurrentObservation, ForecastSample,
        GeocodingCandidate, GeocodingPort, WeatherPort,
    },
};

/// HashMap-backed cache that never expires entries on its own
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    pub writes: AtomicUsize,
}

impl MemoryCache {
    pub fn insert_raw(&self, key: &str, bytes: &[u8]) {
        self.entries.lock().insert(key.to_string(), bytes.to_vec());
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

#[async_trait]
impl CachePort for MemoryCache {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        let value = self.entries.lock().get(key).cloned();
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        Ok(value)
    }

    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        _ttl: Duration,
    ) -> Result<(), ApplicationError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), ApplicationError> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.lock().len() as u64,
        }
    }
}

/// Geocoder returning a fixed answer and counting calls
#[derive(Debug, Default)]
pub struct StubGeocoder {
    pub candidates: Vec<GeocodingCandidate>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl StubGeocoder {
    pub fn returning(candidates: Vec<GeocodingCandidate>) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingPort for StubGeocoder {
    async fn search(&self, _text: &str) -> Result<Vec<GeocodingCandidate>, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ApplicationError::ExternalService(
                "Geocoding request timed out".into(),
            ));
        }
        Ok(self.candidates.clone())
    }
}

/// Which way a stubbed weather call should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Rejected(u16),
    Transport,
}

impl Failure {
    fn into_error(self) -> ApplicationError {
        match self {
            Self::Rejected(status) => ApplicationError::UpstreamRejected {
                status,
                message: "city not found".into(),
            },
            Self::Transport => ApplicationError::ExternalService("connection reset".into()),
        }
    }
}

/// Weather provider with canned payloads and per-endpoint counters
#[derive(Debug)]
pub struct StubWeather {
    pub current: CurrentObservation,
    pub forecast: Vec<ForecastSample>,
    pub current_failure: Option<Failure>,
    pub forecast_failure: Option<Failure>,
    pub zip_calls: AtomicUsize,
    pub coordinate_calls: AtomicUsize,
    pub forecast_calls: AtomicUsize,
}

impl Default for StubWeather {
    fn default() -> Self {
        Self {
            current: sample_current(),
            forecast: sample_forecast(),
            current_failure: None,
            forecast_failure: None,
            zip_calls: AtomicUsize::new(0),
            coordinate_calls: AtomicUsize::new(0),
            forecast_calls: AtomicUsize::new(0),
        }
    }
}

impl StubWeather {
    pub fn total_calls(&self) -> usize {
        self.zip_calls.load(Ordering::SeqCst)
            + self.coordinate_calls.load(Ordering::SeqCst)
            + self.forecast_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherPort for StubWeather {
    async fn current_by_zip(&self, _zip: &ZipCode) -> Result<CurrentObservation, ApplicationError> {
        self.zip_calls.fetch_add(1, Ordering::SeqCst);
        match self.current_failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(self.current.clone()),
        }
    }

    async fn current_by_coordinates(
        &self,
        _location: &GeoLocation,
    ) -> Result<CurrentObservation, ApplicationError> {
        self.coordinate_calls.fetch_add(1, Ordering::SeqCst);
        match self.current_failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(self.current.clone()),
        }
    }

    async fn forecast_by_coordinates(
        &self,
        _location: &GeoLocation,
    ) -> Result<Vec<ForecastSample>, ApplicationError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        match self.forecast_failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(self.forecast.clone()),
        }
    }

    async fn is_available(&self) -> bool {
        true
    }
}

pub fn condition(description: &str, icon: &str) -> ConditionSummary {
    ConditionSummary {
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

pub fn sample_current() -> CurrentObservation {
    CurrentObservation {
        location: GeoLocation::new(34.0901, -118.4065).unwrap(),
        name: "Beverly Hills".to_string(),
        country: Some("US".to_string()),
        temperature: 72.5,
        temperature_max: 78.3,
        temperature_min: 65.1,
        conditions: vec![condition("clear sky", "01d")],
    }
}

pub fn sample(timestamp: &str, temperature: f64) -> ForecastSample {
    ForecastSample {
        timestamp: timestamp.to_string(),
        temperature,
        temperature_max: temperature + 2.0,
        temperature_min: temperature - 9.0,
        conditions: vec![condition("few clouds", "02d")],
    }
}

/// Six days of 3-hourly samples starting 2024-01-01 00:00
pub fn sample_forecast() -> Vec<ForecastSample> {
    let mut samples = Vec::new();
    for day in 1..=6 {
        for hour in (0..24).step_by(3) {
            let temp = 60.0 + f64::from(day) + f64::from(hour) / 10.0;
            samples.push(sample(&format!("2024-01-0{day} {hour:02}:00:00"), temp));
        }
    }
    samples
}
