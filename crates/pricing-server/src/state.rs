//! Application state.

use pricing_cache::TransparentCache;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The read-through cache in front of the price service.
    cache: TransparentCache,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: TransparentCache) -> Self {
        Self { cache }
    }

    /// Returns a reference to the cache.
    pub fn cache(&self) -> &TransparentCache {
        &self.cache
    }
}
