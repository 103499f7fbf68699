//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a [`TransparentCache`](crate::TransparentCache).
///
/// Durations are written in humantime form (`"30s"`, `"5m"`) when
/// (de)serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum age at which a cached price is still served (default: 1 minute).
    #[serde(default = "default_max_age", with = "humantime_serde")]
    pub max_age: Duration,
}

fn default_max_age() -> Duration {
    Duration::from_secs(60)
}

impl CacheConfig {
    /// Creates a config with the given freshness window.
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age: default_max_age(),
        }
    }
}
