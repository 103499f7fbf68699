//! # Pricing Cache
//!
//! Read-through cache in front of an expensive [`PriceService`].
//!
//! The cache remembers every price it fetches together with the moment it
//! was retrieved, and serves it again until it is older than the configured
//! `max_age`. Batches are resolved concurrently, one task per item, and
//! come back in the order they were asked for.
//!
//! ## Features
//!
//! - Thread-safe keyed store with a multiple-reader/single-writer lock
//! - Freshness rule isolated as a pure function, clock injectable for tests
//! - Concurrent fan-out for batch lookups with early exit on first error
//! - Hit/miss/error metrics through the `metrics` facade
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use pricing_cache::TransparentCache;
//!
//! let cache = TransparentCache::new(Arc::new(my_service), Duration::from_secs(60));
//!
//! let price = cache.get_price_for("p1").await?;
//! let prices = cache.get_prices_for(["p1", "p2"]).await?;
//! ```
//!
//! [`PriceService`]: pricing_core::PriceService

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod freshness;
pub mod metrics;
pub mod store;

// Re-exports
pub use cache::TransparentCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::CacheError;
pub use freshness::is_fresh;
pub use crate::metrics::{CacheMetrics, MissReason};
pub use store::{CachedPrice, PriceStore};

// Re-export pricing_core for consumers
pub use pricing_core;
