//! Freshness rule for cached prices.

use std::time::Duration;

use tokio::time::Instant;

/// Returns true if a value retrieved at `retrieved_at` is still valid at `now`.
///
/// An entry is fresh while its age is strictly less than `max_age`; an entry
/// exactly `max_age` old is already stale. A `retrieved_at` later than `now`
/// counts as age zero.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pricing_cache::is_fresh;
/// use tokio::time::Instant;
///
/// let retrieved_at = Instant::now();
/// let max_age = Duration::from_secs(60);
///
/// assert!(is_fresh(retrieved_at + Duration::from_secs(59), retrieved_at, max_age));
/// assert!(!is_fresh(retrieved_at + max_age, retrieved_at, max_age));
/// ```
pub fn is_fresh(now: Instant, retrieved_at: Instant, max_age: Duration) -> bool {
    now.saturating_duration_since(retrieved_at) < max_age
}
