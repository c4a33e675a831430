//! Forecast lookup service
//!
//! The single entry point for turning user text into a forecast:
//! cache check, location resolution, upstream fetch, aggregation, cache write.

use std::{fmt, sync::Arc};

use domain::{
    entities::ForecastResult,
    value_objects::{LocationQuery, ResolvedLocation},
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ApplicationError, LookupError},
    ports::{CacheStats, Clock, CurrentObservation, WeatherPort},
    services::{ForecastCache, GeoResolver, forecast_aggregator::aggregate},
};

/// Orchestrates a forecast lookup for free-form location text
pub struct ForecastService {
    resolver: GeoResolver,
    weather: Arc<dyn WeatherPort>,
    cache: ForecastCache,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastService")
            .field("resolver", &self.resolver)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl ForecastService {
    /// Create a new forecast service
    pub fn new(
        resolver: GeoResolver,
        weather: Arc<dyn WeatherPort>,
        cache: ForecastCache,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            resolver,
            weather,
            cache,
            clock,
        }
    }

    /// Look up current conditions and a 5-day forecast
    ///
    /// Blank input fails before any I/O. A cache hit returns without
    /// resolving or fetching. Only complete results are cached.
    #[instrument(skip(self))]
    pub async fn lookup(&self, address: &str) -> Result<ForecastResult, LookupError> {
        let query = LocationQuery::new(address);
        if query.is_blank() {
            debug!("Rejecting blank input");
            return Err(LookupError::EmptyInput);
        }

        let key = ForecastCache::key_for(&query);
        if let Some(cached) = self.cache.get(&key).await {
            info!(key = %key, "Serving forecast from cache");
            return Ok(cached);
        }

        let Some(location) = self.resolver.resolve(&query).await else {
            info!("No location found for input");
            return Err(LookupError::NoLocationFound);
        };
        debug!(location = %location, "Resolved location");

        let current = self.fetch_current(&location).await?;

        let forecast = self
            .weather
            .forecast_by_coordinates(&current.location)
            .await
            .map_err(|e| {
                warn!(error = %e, "Forecast request failed");
                LookupError::UpstreamUnavailable
            })?;

        let display_name = current
            .display_name()
            .or_else(|| location.label().map(str::to_string))
            .unwrap_or_else(|| match location.as_zip() {
                Some(zip) => zip.to_string(),
                None => query.trimmed().to_string(),
            });

        let result = aggregate(&current, &forecast, &display_name, self.clock.now());
        self.cache.put(&key, &result).await;

        info!(
            address = %result.address,
            days = result.extended_forecast.len(),
            "Fetched fresh forecast"
        );
        Ok(result)
    }

    /// Hit/miss counters of the forecast cache
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Whether the weather provider is configured and usable
    pub async fn is_weather_available(&self) -> bool {
        self.weather.is_available().await
    }

    async fn fetch_current(
        &self,
        location: &ResolvedLocation,
    ) -> Result<CurrentObservation, LookupError> {
        match location {
            ResolvedLocation::ZipCode { zip, .. } => {
                self.weather.current_by_zip(zip).await.map_err(|e| {
                    warn!(zip = %zip, error = %e, "Current conditions request failed");
                    if is_rejection(&e) {
                        LookupError::InvalidZip(zip.to_string())
                    } else {
                        LookupError::UpstreamUnavailable
                    }
                })
            },
            ResolvedLocation::Coordinates { location, .. } => self
                .weather
                .current_by_coordinates(location)
                .await
                .map_err(|e| {
                    warn!(location = %location, error = %e, "Current conditions request failed");
                    LookupError::UpstreamUnavailable
                }),
        }
    }
}

/// The provider answered with a non-success status, as opposed to failing
const fn is_rejection(error: &ApplicationError) -> bool {
    matches!(error, ApplicationError::UpstreamRejected { .. })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::{
        ports::{FixedClock, GeocodingCandidate, MockWeatherPort},
        testing::{Failure, MemoryCache, StubGeocoder, StubWeather, sample_current},
    };

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    struct Harness {
        service: ForecastService,
        weather: Arc<StubWeather>,
        geocoder: Arc<StubGeocoder>,
        backend: Arc<MemoryCache>,
        clock: Arc<FixedClock>,
    }

    fn harness(weather: StubWeather, geocoder: StubGeocoder) -> Harness {
        let weather = Arc::new(weather);
        let geocoder = Arc::new(geocoder);
        let backend = Arc::new(MemoryCache::default());
        let clock = Arc::new(FixedClock::new(start()));
        let service = ForecastService::new(
            GeoResolver::new(geocoder.clone()),
            weather.clone(),
            ForecastCache::new(backend.clone(), clock.clone()),
            clock.clone(),
        );
        Harness {
            service,
            weather,
            geocoder,
            backend,
            clock,
        }
    }

    fn austin() -> GeocodingCandidate {
        GeocodingCandidate {
            postal_code: Some("78701".into()),
            latitude: Some(30.2711),
            longitude: Some(-97.7437),
            name: Some("Austin".into()),
            state: Some("Texas".into()),
            country: Some("US".into()),
        }
    }

    #[tokio::test]
    async fn zip_lookup_fetches_and_rounds() {
        let h = harness(StubWeather::default(), StubGeocoder::default());

        let result = h.service.lookup("90210").await.unwrap();
        assert_eq!(result.current.temperature, 73);
        assert_eq!(result.address, "Beverly Hills, US");
        assert_eq!(result.extended_forecast.len(), 5);
        assert!(!result.from_cache);
        assert_eq!(result.cached_at, start());

        assert_eq!(h.geocoder.calls(), 0);
        assert_eq!(h.weather.zip_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.weather.forecast_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_input_makes_no_calls() {
        let h = harness(StubWeather::default(), StubGeocoder::default());

        for input in ["", "   ", "\t\n"] {
            assert_eq!(h.service.lookup(input).await, Err(LookupError::EmptyInput));
        }
        assert_eq!(h.geocoder.calls(), 0);
        assert_eq!(h.weather.total_calls(), 0);
        assert_eq!(h.service.cache_stats().misses, 0);
    }

    #[tokio::test]
    async fn repeat_lookup_is_served_from_cache() {
        let h = harness(StubWeather::default(), StubGeocoder::returning(vec![austin()]));

        let first = h.service.lookup("Austin").await.unwrap();
        let upstream_after_first = h.weather.total_calls();
        let geocoder_after_first = h.geocoder.calls();

        h.clock.advance(chrono::Duration::minutes(29));
        let second = h.service.lookup("  AUSTIN ").await.unwrap();

        assert!(second.from_cache);
        assert_eq!(second, first.clone().with_from_cache(true));
        assert_eq!(second.cached_at, first.cached_at);
        assert_eq!(h.weather.total_calls(), upstream_after_first);
        assert_eq!(h.geocoder.calls(), geocoder_after_first);
    }

    #[tokio::test]
    async fn expired_cache_refetches() {
        let h = harness(StubWeather::default(), StubGeocoder::default());

        h.service.lookup("90210").await.unwrap();
        h.clock.advance(chrono::Duration::minutes(31));
        let again = h.service.lookup("90210").await.unwrap();

        assert!(!again.from_cache);
        assert_eq!(again.cached_at, start() + chrono::Duration::minutes(31));
        assert_eq!(h.weather.zip_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rejected_zip_is_invalid_and_not_cached() {
        let weather = StubWeather {
            current_failure: Some(Failure::Rejected(404)),
            ..Default::default()
        };
        let h = harness(weather, StubGeocoder::default());

        let err = h.service.lookup("00000").await.unwrap_err();
        assert_eq!(err, LookupError::InvalidZip("00000".into()));
        assert_eq!(err.to_string(), "Invalid ZIP code: 00000");
        assert_eq!(h.backend.writes.load(Ordering::SeqCst), 0);
        assert_eq!(h.weather.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn any_error_status_on_zip_is_invalid_zip() {
        for status in [401, 429, 500, 503] {
            let weather = StubWeather {
                current_failure: Some(Failure::Rejected(status)),
                ..Default::default()
            };
            let h = harness(weather, StubGeocoder::default());

            assert_eq!(
                h.service.lookup("90210").await,
                Err(LookupError::InvalidZip("90210".into())),
                "status {status}"
            );
            assert_eq!(h.weather.forecast_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn transport_error_on_zip_is_unavailable() {
        let weather = StubWeather {
            current_failure: Some(Failure::Transport),
            ..Default::default()
        };
        let h = harness(weather, StubGeocoder::default());

        assert_eq!(
            h.service.lookup("90210").await,
            Err(LookupError::UpstreamUnavailable)
        );
        assert_eq!(h.backend.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn forecast_failure_fails_whole_request() {
        let weather = StubWeather {
            forecast_failure: Some(Failure::Rejected(500)),
            ..Default::default()
        };
        let h = harness(weather, StubGeocoder::default());

        assert_eq!(
            h.service.lookup("90210").await,
            Err(LookupError::UpstreamUnavailable)
        );
        assert_eq!(h.weather.zip_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.backend.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn errors_are_retried_on_next_call() {
        let weather = StubWeather {
            current_failure: Some(Failure::Transport),
            ..Default::default()
        };
        let h = harness(weather, StubGeocoder::default());

        let _ = h.service.lookup("90210").await;
        let _ = h.service.lookup("90210").await;
        assert_eq!(h.weather.zip_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unresolvable_input_is_no_location() {
        let h = harness(StubWeather::default(), StubGeocoder::default());

        let err = h.service.lookup("asdfghjkl").await.unwrap_err();
        assert_eq!(err, LookupError::NoLocationFound);
        assert_eq!(err.to_string(), "No valid ZIP code found");
        assert_eq!(h.weather.total_calls(), 0);
    }

    #[tokio::test]
    async fn geocoder_failure_degrades_to_text_zip() {
        let h = harness(StubWeather::default(), StubGeocoder::failing());

        let result = h.service.lookup("1 Main St, Springfield IL 62701").await;
        assert!(result.is_ok());
        assert_eq!(h.weather.zip_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn geocoder_failure_without_zip_is_no_location() {
        let h = harness(StubWeather::default(), StubGeocoder::failing());
        assert_eq!(
            h.service.lookup("Springfield").await,
            Err(LookupError::NoLocationFound)
        );
    }

    #[tokio::test]
    async fn coordinates_path_uses_coordinate_endpoint() {
        let candidate = GeocodingCandidate {
            postal_code: None,
            ..austin()
        };
        let h = harness(StubWeather::default(), StubGeocoder::returning(vec![candidate]));

        h.service.lookup("Austin").await.unwrap();
        assert_eq!(h.weather.zip_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.weather.coordinate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejection_on_coordinates_is_unavailable() {
        let candidate = GeocodingCandidate {
            postal_code: None,
            ..austin()
        };
        let weather = StubWeather {
            current_failure: Some(Failure::Rejected(400)),
            ..Default::default()
        };
        let h = harness(weather, StubGeocoder::returning(vec![candidate]));

        assert_eq!(
            h.service.lookup("Austin").await,
            Err(LookupError::UpstreamUnavailable)
        );
    }

    #[tokio::test]
    async fn display_name_falls_back_to_geocoder_label() {
        let mut weather = StubWeather::default();
        weather.current.name = String::new();
        let h = harness(weather, StubGeocoder::returning(vec![austin()]));

        let result = h.service.lookup("Austin").await.unwrap();
        assert_eq!(result.address, "Austin, Texas, US");
    }

    #[tokio::test]
    async fn display_name_falls_back_to_zip() {
        let mut weather = StubWeather::default();
        weather.current.name = String::new();
        let h = harness(weather, StubGeocoder::default());

        let result = h.service.lookup("90210").await.unwrap();
        assert_eq!(result.address, "90210");
    }

    #[tokio::test]
    async fn forecast_uses_coordinates_from_current_call() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_by_zip()
            .times(1)
            .returning(|_| Ok(sample_current()));
        weather
            .expect_forecast_by_coordinates()
            .withf(|loc| (loc.latitude() - 34.0901).abs() < 1e-9)
            .times(1)
            .returning(|_| Ok(vec![]));

        let clock = Arc::new(FixedClock::new(start()));
        let service = ForecastService::new(
            GeoResolver::without_geocoder(),
            Arc::new(weather),
            ForecastCache::new(Arc::new(MemoryCache::default()), clock.clone()),
            clock,
        );

        let result = service.lookup("90210").await.unwrap();
        assert!(result.extended_forecast.is_empty());
    }

    #[tokio::test]
    async fn availability_delegates_to_weather_port() {
        let mut weather = MockWeatherPort::new();
        weather.expect_is_available().returning(|| false);

        let clock = Arc::new(FixedClock::new(start()));
        let service = ForecastService::new(
            GeoResolver::without_geocoder(),
            Arc::new(weather),
            ForecastCache::new(Arc::new(MemoryCache::default()), clock.clone()),
            clock,
        );
        assert!(!service.is_weather_available().await);
    }

    #[test]
    fn rejection_classification() {
        let rejected = ApplicationError::UpstreamRejected {
            status: 404,
            message: "city not found".into(),
        };
        let throttled = ApplicationError::UpstreamRejected {
            status: 429,
            message: "slow down".into(),
        };
        assert!(is_rejection(&rejected));
        assert!(is_rejection(&throttled));
        assert!(!is_rejection(&ApplicationError::ExternalService("x".into())));
    }
}
