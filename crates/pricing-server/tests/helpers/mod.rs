//! Helpers compartidos por los tests de integracion.

#![allow(dead_code)]

pub mod client;

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;
use pricing_cache::TransparentCache;
use pricing_server::{AppState, CatalogPriceService, create_router};

pub use client::{TestClient, TestResponse};

/// Catalog used by every HTTP test: p1 = 5, p2 = 7.
pub fn catalog() -> CatalogPriceService {
    CatalogPriceService::from_prices([("p1", 5.0), ("p2", 7.0)])
}

/// Builds a cache over the test catalog.
pub fn test_cache() -> TransparentCache {
    TransparentCache::new(Arc::new(catalog()), Duration::from_secs(60))
}

/// Builds a client over a router sharing `cache`, so tests can inspect it.
pub fn client_with_cache(cache: TransparentCache) -> TestClient {
    // Recorder is built but not installed globally
    let handle = PrometheusBuilder::new().build_recorder().handle();
    TestClient::new(create_router(AppState::new(cache), handle))
}

/// Cliente sobre un router recien creado.
pub fn client() -> TestClient {
    client_with_cache(test_cache())
}
