//! # Pricing Core
//!
//! Domain types shared by the pricing workspace.
//!
//! This crate defines the narrow contract between the cache and whatever
//! expensive lookup service sits behind it:
//!
//! - [`Price`] - the value returned for an item
//! - [`PriceService`] - the upstream lookup capability
//! - [`ServiceError`] - failures reported by an upstream
//!
//! ## Example
//!
//! ```
//! use async_trait::async_trait;
//! use pricing_core::{Price, PriceService, ServiceError};
//!
//! struct FixedPrice(Price);
//!
//! #[async_trait]
//! impl PriceService for FixedPrice {
//!     async fn get_price_for(&self, _item_code: &str) -> Result<Price, ServiceError> {
//!         Ok(self.0)
//!     }
//! }
//! ```

pub mod error;
pub mod service;

pub use error::{Result, ServiceError};
pub use service::{Price, PriceService};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
