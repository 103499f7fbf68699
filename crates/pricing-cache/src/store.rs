//! Thread-safe keyed store of cached prices.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use pricing_core::Price;
use tokio::time::Instant;

use crate::freshness::is_fresh;

/// A price together with the moment it was fetched from upstream.
///
/// Entries are replaced as a whole on refresh, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedPrice {
    /// Last known price for the item.
    pub price: Price,
    /// When the price was retrieved from the upstream service.
    pub retrieved_at: Instant,
}

impl CachedPrice {
    /// Creates a new cached price.
    pub fn new(price: Price, retrieved_at: Instant) -> Self {
        Self {
            price,
            retrieved_at,
        }
    }

    /// Returns the age of this entry at `now`.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.retrieved_at)
    }

    /// Returns true if this entry is still valid at `now`.
    pub fn is_fresh_at(&self, now: Instant, max_age: Duration) -> bool {
        is_fresh(now, self.retrieved_at, max_age)
    }
}

/// Concurrent map from item code to [`CachedPrice`].
///
/// Reads proceed in parallel; every write excludes readers and other
/// writers. The store knows nothing about freshness: stale entries stay
/// until they are overwritten or deleted.
#[derive(Debug, Default)]
pub struct PriceStore {
    entries: RwLock<HashMap<String, CachedPrice>>,
}

impl PriceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `item_code`, if any.
    pub fn load(&self, item_code: &str) -> Option<CachedPrice> {
        self.entries.read().get(item_code).copied()
    }

    /// Inserts or replaces the entry for `item_code`.
    pub fn store(&self, item_code: impl Into<String>, value: CachedPrice) {
        let mut entries = self.entries.write();
        entries.insert(item_code.into(), value);
    }

    /// Removes the entry for `item_code`. Returns false if there was none.
    pub fn delete(&self, item_code: &str) -> bool {
        let mut entries = self.entries.write();
        entries.remove(item_code).is_some()
    }

    /// Removes every entry and returns how many were dropped.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write();
        let count = entries.len();
        entries.clear();
        count
    }

    /// Returns the number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
