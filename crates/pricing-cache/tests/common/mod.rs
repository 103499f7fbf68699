#![allow(dead_code)]
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pricing_cache::TransparentCache;
use pricing_cache::pricing_core::{Price, PriceService, ServiceError};

/// What the mock returns for one item, and how long it takes.
#[derive(Debug, Clone)]
pub struct MockResult {
    pub result: Result<Price, ServiceError>,
    pub delay: Duration,
}

impl MockResult {
    pub fn ok(price: Price) -> Self {
        Self {
            result: Ok(price),
            delay: Duration::ZERO,
        }
    }

    pub fn err(message: &str) -> Self {
        Self {
            result: Err(ServiceError::other(message)),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Upstream stand-in that counts calls and can simulate slow lookups.
///
/// Panics when asked for an item it has no result for: that is a bug in
/// the test, not a service failure.
#[derive(Debug, Default)]
pub struct MockPriceService {
    num_calls: AtomicUsize,
    results: Mutex<HashMap<String, MockResult>>,
    call_delay: Duration,
}

impl MockPriceService {
    pub fn new<'a>(results: impl IntoIterator<Item = (&'a str, MockResult)>) -> Self {
        Self {
            num_calls: AtomicUsize::new(0),
            results: Mutex::new(
                results
                    .into_iter()
                    .map(|(code, result)| (code.to_string(), result))
                    .collect(),
            ),
            call_delay: Duration::ZERO,
        }
    }

    /// Every call sleeps this long before answering.
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = delay;
        self
    }

    pub fn set_result(&self, item_code: &str, result: MockResult) {
        self.results.lock().insert(item_code.to_string(), result);
    }

    pub fn num_calls(&self) -> usize {
        self.num_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceService for MockPriceService {
    async fn get_price_for(&self, item_code: &str) -> Result<Price, ServiceError> {
        self.num_calls.fetch_add(1, Ordering::SeqCst);

        let mock = self
            .results
            .lock()
            .get(item_code)
            .cloned()
            .unwrap_or_else(|| {
                panic!("bug in the tests, we didn't have a mock result for [{item_code}]")
            });

        let delay = self.call_delay + mock.delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        mock.result
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Builds a cache over `service` with the given freshness window.
pub fn cache_over(service: &Arc<MockPriceService>, max_age: Duration) -> TransparentCache {
    TransparentCache::new(service.clone(), max_age)
}

pub async fn get_price_with_no_err(cache: &TransparentCache, item_code: &str) -> Price {
    cache
        .get_price_for(item_code)
        .await
        .unwrap_or_else(|e| panic!("error getting price for {item_code}: {e}"))
}

pub async fn get_prices_with_no_err(cache: &TransparentCache, item_codes: &[&str]) -> Vec<Price> {
    cache
        .get_prices_for(item_codes.iter().copied())
        .await
        .unwrap_or_else(|e| panic!("error getting prices for {item_codes:?}: {e}"))
}
