//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Describes the cache metrics to the installed recorder.
/// Call once at startup, after the recorder is installed.
pub fn register_cache_metrics() {
    metrics::describe_counter!("pricing_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!(
        "pricing_cache_misses_total",
        "Total number of cache misses (absent or stale entries)"
    );
    metrics::describe_counter!(
        "pricing_cache_upstream_errors_total",
        "Total number of failed upstream price lookups"
    );
    metrics::describe_gauge!("pricing_cache_entries", "Current number of entries in cache");
    metrics::describe_histogram!(
        "pricing_cache_upstream_seconds",
        "Time spent waiting on the upstream price service"
    );
    metrics::describe_histogram!(
        "pricing_cache_batch_size",
        "Number of items requested per batch lookup"
    );
}

/// Why a lookup could not be served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// No entry for the item.
    Absent,
    /// An entry exists but is older than the freshness window.
    Stale,
}

impl MissReason {
    fn as_str(self) -> &'static str {
        match self {
            MissReason::Absent => "absent",
            MissReason::Stale => "stale",
        }
    }
}

/// Cache metrics recorder.
///
/// Every event goes to the `metrics` facade and to in-process atomic
/// counters, so tests and logs can read totals without a recorder.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    upstream_calls: Arc<AtomicU64>,
    upstream_errors: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup served from the cache.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("pricing_cache_hits_total").increment(1);
    }

    /// Records a lookup that has to go upstream.
    pub fn record_miss(&self, reason: MissReason) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("pricing_cache_misses_total", "reason" => reason.as_str()).increment(1);
    }

    /// Records one completed upstream call and how long it took.
    pub fn record_upstream_call(&self, duration: Duration, success: bool) {
        self.upstream_calls.fetch_add(1, Ordering::Relaxed);
        histogram!("pricing_cache_upstream_seconds").record(duration.as_secs_f64());

        if !success {
            self.upstream_errors.fetch_add(1, Ordering::Relaxed);
            counter!("pricing_cache_upstream_errors_total").increment(1);
        }
    }

    /// Records the size of a batch lookup.
    pub fn record_batch(&self, size: usize) {
        histogram!("pricing_cache_batch_size").record(size as f64);
    }

    /// Updates the entry gauge.
    pub fn update_entry_count(&self, count: usize) {
        gauge!("pricing_cache_entries").set(count as f64);
    }

    /// Hit rate over all lookups so far (0.0 when nothing was looked up).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn upstream_calls(&self) -> u64 {
        self.upstream_calls.load(Ordering::Relaxed)
    }

    pub fn upstream_errors(&self) -> u64 {
        self.upstream_errors.load(Ordering::Relaxed)
    }
}
