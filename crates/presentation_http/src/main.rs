//! Forecaster HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    ForecastCache, ForecastService, GeoResolver,
    ports::{CachePort, Clock, GeocodingPort, SystemClock, WeatherPort},
};
use infrastructure::{
    AppConfig, GeocodingProvider, MokaCache, MokaCacheConfig, NominatimGeocodingAdapter,
    OpenWeatherGeocodingAdapter, WeatherAdapter, init_telemetry,
};
use integration_weather::OpenWeatherClient;
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_telemetry(&config.telemetry)?;

    info!("🌤️ Forecaster v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = &loaded {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        geocoding = ?config.geocoding.provider,
        cache_ttl_minutes = config.cache.ttl_minutes,
        "Configuration loaded"
    );

    if !config.has_weather_api_key() {
        warn!("No weather API key configured; set FORECASTER_WEATHER__API_KEY");
    }

    let weather_client = Arc::new(
        OpenWeatherClient::new(config.weather.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {e}"))?,
    );
    let weather: Arc<dyn WeatherPort> = Arc::new(WeatherAdapter::new(Arc::clone(&weather_client)));

    let resolver = match config.geocoding.provider {
        GeocodingProvider::Nominatim => {
            let geocoder: Arc<dyn GeocodingPort> =
                Arc::new(NominatimGeocodingAdapter::new(&config.geocoding.nominatim())?);
            GeoResolver::new(geocoder)
        },
        GeocodingProvider::OpenWeather => {
            let geocoder: Arc<dyn GeocodingPort> =
                Arc::new(OpenWeatherGeocodingAdapter::new(Arc::clone(&weather_client)));
            GeoResolver::new(geocoder)
        },
        GeocodingProvider::Disabled => GeoResolver::without_geocoder(),
    };

    let backend: Arc<dyn CachePort> = Arc::new(MokaCache::with_config(MokaCacheConfig {
        max_capacity_mb: config.cache.max_capacity_mb,
    }));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = ForecastCache::with_ttl(backend, Arc::clone(&clock), config.cache.ttl());

    let forecast_service = ForecastService::new(resolver, weather, cache, clock);

    let state = AppState {
        forecast_service: Arc::new(forecast_service),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET])
            .allow_headers(Any)
    };

    let app = app.layer(TraceLayer::new_for_http()).layer(cors_layer);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("🔎 Try: http://{}/weather?address=90210", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout()))
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
