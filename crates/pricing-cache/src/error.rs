//! Error types for cache lookups.

use pricing_core::ServiceError;
use thiserror::Error;

/// Errors returned by [`TransparentCache`](crate::TransparentCache).
///
/// A batch lookup surfaces the first per-item error it receives unchanged,
/// so the same variants describe both single and batch failures.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The upstream service failed for an item. Nothing was cached.
    #[error("getting price from service: {source}")]
    Service {
        /// Item whose lookup failed
        item_code: String,
        /// Error reported by the service
        source: ServiceError,
    },

    /// A batch lost one of its workers before every item reported back.
    #[error("batch lookup incomplete: received {received} of {expected} results")]
    Incomplete {
        /// Number of items in the batch
        expected: usize,
        /// Number of results received before the workers were gone
        received: usize,
    },
}

impl CacheError {
    /// Creates a Service error for the given item.
    pub fn service(item_code: impl Into<String>, source: ServiceError) -> Self {
        Self::Service {
            item_code: item_code.into(),
            source,
        }
    }

    /// Returns the item whose lookup failed, if the error is tied to one.
    pub fn item_code(&self) -> Option<&str> {
        match self {
            Self::Service { item_code, .. } => Some(item_code),
            Self::Incomplete { .. } => None,
        }
    }

    /// Returns true if the upstream reported the item as unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Service { source, .. } if source.is_not_found())
    }
}
