//! Error types reported by upstream price services.
//!
//! Every upstream failure is permanent from the cache's point of view:
//! nothing in this workspace retries a failed lookup, so the variants only
//! exist to carry context to the caller (and to let the HTTP layer pick a
//! status code).

use thiserror::Error;

/// Errors that a [`PriceService`](crate::PriceService) can return.
///
/// # Example
///
/// ```
/// use pricing_core::ServiceError;
///
/// let error = ServiceError::unavailable("connection refused");
/// assert_eq!(error.to_string(), "service unavailable: connection refused");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// The service does not know the requested item.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// The service could not be reached or refused to answer.
    #[error("service unavailable: {reason}")]
    Unavailable {
        /// Why the service was unavailable
        reason: String,
    },

    /// Any other failure, described by the service.
    #[error("{0}")]
    Other(String),
}

impl ServiceError {
    /// Creates an ItemNotFound error.
    pub fn item_not_found(item_code: impl Into<String>) -> Self {
        Self::ItemNotFound(item_code.into())
    }

    /// Creates an Unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Creates a generic error from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Returns true if the service reported the item as unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound(_))
    }
}

/// Type alias for Results with ServiceError.
pub type Result<T> = std::result::Result<T, ServiceError>;
