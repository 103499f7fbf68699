//! Metrics module for the pricing server.

pub mod http;
pub mod setup;

pub use setup::init_metrics;
