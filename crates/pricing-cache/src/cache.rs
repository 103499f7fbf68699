//! Read-through cache over a [`PriceService`].

use std::sync::Arc;
use std::time::Duration;

use pricing_core::{Price, PriceService};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::metrics::{CacheMetrics, MissReason};
use crate::store::{CachedPrice, PriceStore};

/// Outcome reported by one worker of a batch lookup.
enum Resolution {
    Resolved { position: usize, price: Price },
    Failed(CacheError),
}

/// Cache that wraps the actual price service.
///
/// Prices are remembered so that repeated lookups don't pay for the
/// expensive call, but a price is only served while it is younger than
/// `max_age`. Clones share the same store, service and metrics.
///
/// There is no per-item single-flight: two concurrent lookups of the same
/// missing or stale item both call upstream, and the last write wins.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use pricing_cache::TransparentCache;
/// use pricing_cache::pricing_core::{Price, PriceService, ServiceError};
///
/// struct Backend;
///
/// #[async_trait]
/// impl PriceService for Backend {
///     async fn get_price_for(&self, _item_code: &str) -> Result<Price, ServiceError> {
///         Ok(9.99)
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), pricing_cache::CacheError> {
/// let cache = TransparentCache::new(Arc::new(Backend), Duration::from_secs(60));
///
/// let price = cache.get_price_for("p1").await?;
/// let prices = cache.get_prices_for(["p1", "p2"]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TransparentCache {
    service: Arc<dyn PriceService>,
    store: Arc<PriceStore>,
    clock: Arc<dyn Clock>,
    max_age: Duration,
    metrics: CacheMetrics,
}

impl TransparentCache {
    /// Creates a cache in front of `service` that serves prices younger than `max_age`.
    pub fn new(service: Arc<dyn PriceService>, max_age: Duration) -> Self {
        Self {
            service,
            store: Arc::new(PriceStore::new()),
            clock: Arc::new(SystemClock),
            max_age,
            metrics: CacheMetrics::new(),
        }
    }

    /// Creates a cache from a [`CacheConfig`].
    pub fn from_config(service: Arc<dyn PriceService>, config: &CacheConfig) -> Self {
        Self::new(service, config.max_age)
    }

    /// Replaces the time source. Meant to be called right after construction.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Gets the price for the item, either from the cache or from the
    /// service if it was not cached or is too old.
    ///
    /// A fresh entry is returned without touching the service. Otherwise the
    /// service is called exactly once; on success the new price replaces
    /// whatever was stored, on failure the store is left untouched.
    ///
    /// # Errors
    ///
    /// `CacheError::Service` if the upstream call fails.
    pub async fn get_price_for(&self, item_code: &str) -> Result<Price, CacheError> {
        let now = self.clock.now();

        let reason = match self.store.load(item_code) {
            Some(cached) if cached.is_fresh_at(now, self.max_age) => {
                self.metrics.record_hit();
                debug!(
                    item_code = %item_code,
                    age_ms = cached.age_at(now).as_millis() as u64,
                    "Price served from cache"
                );
                return Ok(cached.price);
            },
            Some(_) => MissReason::Stale,
            None => MissReason::Absent,
        };

        self.metrics.record_miss(reason);
        debug!(item_code = %item_code, reason = ?reason, "Fetching price from {}", self.service.name());

        let start = Instant::now();
        let result = self.service.get_price_for(item_code).await;
        self.metrics
            .record_upstream_call(start.elapsed(), result.is_ok());

        match result {
            Ok(price) => {
                self.store
                    .store(item_code, CachedPrice::new(price, self.clock.now()));
                self.metrics.update_entry_count(self.store.len());
                Ok(price)
            },
            Err(e) => {
                warn!(item_code = %item_code, error = %e, "Upstream price lookup failed");
                Err(CacheError::service(item_code, e))
            },
        }
    }

    /// Gets the prices for several items at once, in the order given.
    ///
    /// Every item is resolved on its own Tokio task through
    /// [`get_price_for`](Self::get_price_for), duplicates included. The first
    /// error ends the batch: it is returned right away and no prices are
    /// reported. Tasks still in flight are not cancelled; they run to
    /// completion and keep updating the store.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// The first `CacheError` reported by any item, or
    /// `CacheError::Incomplete` if a worker died without reporting.
    pub async fn get_prices_for<I, S>(&self, item_codes: I) -> Result<Vec<Price>, CacheError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let item_codes: Vec<String> = item_codes.into_iter().map(Into::into).collect();
        let expected = item_codes.len();
        self.metrics.record_batch(expected);

        if expected == 0 {
            return Ok(Vec::new());
        }

        // One slot per worker: late senders never block once we stop listening.
        let (tx, mut rx) = mpsc::channel(expected);

        for (position, item_code) in item_codes.into_iter().enumerate() {
            let cache = self.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let resolution = match cache.get_price_for(&item_code).await {
                    Ok(price) => Resolution::Resolved { position, price },
                    Err(e) => Resolution::Failed(e),
                };
                let _ = tx.send(resolution).await;
            });
        }
        drop(tx);

        let mut prices = vec![0.0; expected];
        let mut received = 0;

        while received < expected {
            match rx.recv().await {
                Some(Resolution::Resolved { position, price }) => {
                    prices[position] = price;
                    received += 1;
                },
                Some(Resolution::Failed(e)) => {
                    debug!(expected, received, "Batch lookup aborted on first error");
                    return Err(e);
                },
                None => return Err(CacheError::Incomplete { expected, received }),
            }
        }

        Ok(prices)
    }

    /// Drops the cached price for an item. Returns false if none was cached.
    pub fn invalidate(&self, item_code: &str) -> bool {
        let removed = self.store.delete(item_code);
        self.metrics.update_entry_count(self.store.len());
        removed
    }

    /// Drops every cached price and returns how many were removed.
    pub fn invalidate_all(&self) -> usize {
        let count = self.store.clear();
        self.metrics.update_entry_count(0);
        count
    }

    /// Returns the freshness window.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &PriceStore {
        &self.store
    }

    /// Returns the metrics for external access.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Returns the number of cached entries, fresh or stale.
    pub fn entry_count(&self) -> usize {
        self.store.len()
    }
}

impl std::fmt::Debug for TransparentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransparentCache")
            .field("service", &self.service.name())
            .field("max_age", &self.max_age)
            .field("entries", &self.store.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use async_trait::async_trait;
    use pricing_core::ServiceError;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Returns `price` for every item except "bad", counting calls.
    struct CountingService {
        price: Price,
        calls: AtomicU32,
    }

    impl CountingService {
        fn new(price: Price) -> Arc<Self> {
            Arc::new(Self {
                price,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceService for CountingService {
        async fn get_price_for(&self, item_code: &str) -> Result<Price, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match item_code {
                "bad" => Err(ServiceError::other("some error")),
                _ => Ok(self.price),
            }
        }
    }

    fn cache_with_clock(
        service: Arc<CountingService>,
        max_age: Duration,
    ) -> (TransparentCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TransparentCache::new(service, max_age).with_clock(clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_entry_just_below_max_age_is_a_hit() {
        let service = CountingService::new(5.0);
        let (cache, clock) = cache_with_clock(service.clone(), Duration::from_secs(60));

        cache.get_price_for("p1").await.unwrap();
        clock.advance(Duration::from_secs(60) - Duration::from_nanos(1));
        cache.get_price_for("p1").await.unwrap();

        assert_eq!(service.calls(), 1);
        assert_eq!(cache.metrics().hits(), 1);
    }

    #[tokio::test]
    async fn test_entry_exactly_max_age_is_refetched() {
        let service = CountingService::new(5.0);
        let (cache, clock) = cache_with_clock(service.clone(), Duration::from_secs(60));

        cache.get_price_for("p1").await.unwrap();
        clock.advance(Duration::from_secs(60));
        cache.get_price_for("p1").await.unwrap();

        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_one_refetch_per_stale_access() {
        let service = CountingService::new(5.0);
        let (cache, clock) = cache_with_clock(service.clone(), Duration::from_secs(10));

        cache.get_price_for("p1").await.unwrap();

        // Long gap covering many windows: still only one refetch
        clock.advance(Duration::from_secs(100));
        cache.get_price_for("p1").await.unwrap();
        cache.get_price_for("p1").await.unwrap();

        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_restamps_entry() {
        let service = CountingService::new(5.0);
        let (cache, clock) = cache_with_clock(service.clone(), Duration::from_secs(10));

        cache.get_price_for("p1").await.unwrap();
        clock.advance(Duration::from_secs(15));
        cache.get_price_for("p1").await.unwrap();

        let cached = cache.store().load("p1").unwrap();
        assert_eq!(cached.retrieved_at, clock.now());
    }

    #[tokio::test]
    async fn test_error_is_not_cached() {
        let service = CountingService::new(5.0);
        let (cache, _clock) = cache_with_clock(service.clone(), Duration::from_secs(60));

        assert!(cache.get_price_for("bad").await.is_err());
        assert!(cache.get_price_for("bad").await.is_err());

        assert_eq!(service.calls(), 2);
        assert!(cache.store().load("bad").is_none());
        assert_eq!(cache.metrics().upstream_errors(), 2);
    }

    #[tokio::test]
    async fn test_zero_max_age_always_goes_upstream() {
        let service = CountingService::new(5.0);
        let (cache, _clock) = cache_with_clock(service.clone(), Duration::ZERO);

        cache.get_price_for("p1").await.unwrap();
        cache.get_price_for("p1").await.unwrap();

        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let service = CountingService::new(5.0);
        let cache = TransparentCache::new(service.clone(), Duration::from_secs(60));

        let prices = cache.get_prices_for(Vec::<String>::new()).await.unwrap();

        assert!(prices.is_empty());
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let service = CountingService::new(5.0);
        let cache = TransparentCache::new(service.clone(), Duration::from_secs(60));

        cache.get_price_for("p1").await.unwrap();
        assert!(cache.invalidate("p1"));
        assert!(!cache.invalidate("p1"));
        cache.get_price_for("p1").await.unwrap();

        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let service = CountingService::new(5.0);
        let cache = TransparentCache::new(service, Duration::from_secs(60));

        cache.get_prices_for(["p1", "p2", "p3"]).await.unwrap();
        assert_eq!(cache.entry_count(), 3);

        assert_eq!(cache.invalidate_all(), 3);
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_from_config() {
        let config = CacheConfig::new(Duration::from_secs(5));
        let cache = TransparentCache::from_config(CountingService::new(1.0), &config);
        assert_eq!(cache.max_age(), Duration::from_secs(5));
    }

    #[test]
    fn test_debug_output() {
        let cache = TransparentCache::new(CountingService::new(1.0), Duration::from_secs(5));
        let debug = format!("{:?}", cache);
        assert!(debug.contains("price-service"));
        assert!(debug.contains("entries: 0"));
    }
}
