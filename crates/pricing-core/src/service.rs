//! Upstream price service trait definition.

use async_trait::async_trait;

use crate::error::ServiceError;

/// Numeric value returned for an item.
pub type Price = f64;

/// A service that knows the price of items.
///
/// Calls are assumed to be expensive (slow, possibly failing), which is the
/// whole reason a cache sits in front of it. Implementations must be safe to
/// call concurrently: the cache resolves batches by issuing one call per
/// item at the same time.
///
/// # Example
///
/// ```ignore
/// use pricing_core::{Price, PriceService, ServiceError};
///
/// struct HttpPriceService { client: reqwest::Client }
///
/// #[async_trait]
/// impl PriceService for HttpPriceService {
///     async fn get_price_for(&self, item_code: &str) -> Result<Price, ServiceError> {
///         // Call the remote pricing API
///     }
///
///     fn name(&self) -> &str {
///         "http"
///     }
/// }
/// ```
#[async_trait]
pub trait PriceService: Send + Sync {
    /// Looks up the current price of `item_code`.
    ///
    /// # Errors
    ///
    /// Any error is treated as a permanent failure for this call; the caller
    /// does not retry and does not cache it.
    async fn get_price_for(&self, item_code: &str) -> Result<Price, ServiceError>;

    /// Returns the name of this service.
    ///
    /// This is used for logging and identification purposes.
    fn name(&self) -> &str {
        "price-service"
    }
}
