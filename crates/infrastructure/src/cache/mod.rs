//! Cache implementations
//!
//! - `MokaCache`: in-memory cache with per-entry TTL, backing the forecast cache

mod moka_cache;

pub use moka_cache::{MokaCache, MokaCacheConfig};
