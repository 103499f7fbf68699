//! Pricing Server - HTTP front for the pricing cache.
//!
//! Exposes single and batch price lookups over HTTP, backed by a
//! [`TransparentCache`](pricing_cache::TransparentCache) in front of a
//! catalog-based upstream, plus cache invalidation, health and Prometheus
//! metrics endpoints.

pub mod catalog;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod state;

pub use catalog::{CatalogError, CatalogPriceService};
pub use error::AppError;
pub use server::{create_router, run_server};
pub use settings::{Settings, SettingsError};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
