//! Metrics setup and initialization.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use pricing_cache::metrics::register_cache_metrics;
use tracing::info;

use super::http::register_http_metrics;

/// Buckets for every histogram. Latencies are in seconds, batch sizes in items.
const BUCKETS: &[f64] = &[
    0.0001, // 100 microsegundos
    0.0005, // 500 microsegundos
    0.001,  // 1 milisegundo
    0.005,  // 5 milisegundos
    0.01,   // 10 milisegundos
    0.05,   // 50 milisegundos
    0.1,    // 100 milisegundos
    0.5,    // 500 milisegundos
    1.0,    // 1 segundo
    2.5,
    5.0,
    10.0,
    25.0,
    100.0,
];

/// Instala el recorder global y retorna el handle para el endpoint.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets(BUCKETS)?
        .install_recorder()?;

    register_cache_metrics();
    register_http_metrics();

    info!("Metrics system initialized");
    Ok(handle)
}
