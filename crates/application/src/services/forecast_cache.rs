//! Forecast cache
//!
//! Typed TTL cache for `ForecastResult` on top of a byte-oriented `CachePort`.
//! Expiry is checked against the injected clock on every read, independent
//! of whatever eviction the backend does on its own.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use domain::{
    entities::ForecastResult,
    value_objects::{LocationQuery, ZipCode},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ports::{CachePort, CachePortExt, CacheStats, Clock, ttl};

/// Generate a cache key from a prefix and hashed components
///
/// Components are hashed with blake3, so keys have a fixed length
/// regardless of input size.
#[must_use]
pub fn generate_cache_key(prefix: &str, components: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for component in components {
        hasher.update(component.as_bytes());
        hasher.update(b"|");
    }
    format!("{prefix}:{}", hasher.finalize().to_hex())
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    value: ForecastResult,
    expires_at: DateTime<Utc>,
}

/// Forecast results keyed by normalized input
pub struct ForecastCache {
    backend: Arc<dyn CachePort>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl fmt::Debug for ForecastCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastCache")
            .field("backend", &self.backend)
            .field("ttl", &self.ttl)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl ForecastCache {
    /// Cache with the standard 30 minute TTL
    pub fn new(backend: Arc<dyn CachePort>, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(backend, clock, ttl::FORECAST)
    }

    /// Cache with a custom TTL
    pub fn with_ttl(backend: Arc<dyn CachePort>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            backend,
            clock,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Time-to-live applied to new entries
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Key for a query, computed from the text alone
    ///
    /// A bare ZIP or ZIP+4 keys as `zip:<5 digits>`; anything else as a
    /// digest of the lower-cased, whitespace-collapsed text.
    #[must_use]
    pub fn key_for(query: &LocationQuery) -> String {
        match ZipCode::parse(query.trimmed()) {
            Ok(zip) => format!("zip:{zip}"),
            Err(_) => generate_cache_key("address", &[&query.normalized()]),
        }
    }

    /// Look up a fresh entry
    ///
    /// Hits come back with `from_cache` set and the original `cached_at`.
    /// Backend errors, unreadable entries, and expired entries are all misses.
    pub async fn get(&self, key: &str) -> Option<ForecastResult> {
        let found = self.lookup(key).await;
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    async fn lookup(&self, key: &str) -> Option<ForecastResult> {
        let entry = match self.backend.get::<CacheEntry>(key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(key, "Forecast cache miss");
                return None;
            },
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable cache entry");
                self.discard(key).await;
                return None;
            },
        };

        if self.clock.now() > entry.expires_at {
            debug!(key, expires_at = %entry.expires_at, "Forecast cache entry expired");
            self.discard(key).await;
            return None;
        }

        debug!(key, "Forecast cache hit");
        Some(entry.value.with_from_cache(true))
    }

    /// Store a freshly aggregated result
    ///
    /// Failures are logged; the caller still has its result.
    pub async fn put(&self, key: &str, value: &ForecastResult) {
        let Ok(ttl) = chrono::Duration::from_std(self.ttl) else {
            warn!(key, "Cache TTL out of range, not caching");
            return;
        };
        let entry = CacheEntry {
            value: value.clone().with_from_cache(false),
            expires_at: self.clock.now() + ttl,
        };

        if let Err(e) = self.backend.set(key, &entry, self.ttl).await {
            warn!(key, error = %e, "Failed to write forecast cache entry");
        } else {
            debug!(key, expires_at = %entry.expires_at, "Cached forecast");
        }
    }

    /// Fresh hits and misses seen by this cache, plus the backend's entry count
    ///
    /// Expired and unreadable entries count as misses here even when the
    /// backend served them.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.backend.stats().entries,
        }
    }

    async fn discard(&self, key: &str) {
        if let Err(e) = self.backend.invalidate(key).await {
            warn!(key, error = %e, "Failed to invalidate cache entry");
        }
    }
}
