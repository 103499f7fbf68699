//! Pricing Server binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use pricing_cache::TransparentCache;
use pricing_server::{AppState, CatalogPriceService, Settings, metrics::init_metrics, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = PathBuf::from(
        std::env::var("PRICING_CONFIG").unwrap_or_else(|_| "config/pricing.yaml".to_string()),
    );
    let settings =
        Settings::load(Some(config_path.as_path())).context("failed to load server settings")?;

    tracing::info!("Starting Pricing Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Settings file: {}", config_path.display());
    tracing::info!("Cache max age: {:?}", settings.cache.max_age);

    let catalog = match &settings.catalog.path {
        Some(path) => {
            let catalog = CatalogPriceService::load(path)
                .await
                .with_context(|| format!("failed to load catalog {}", path.display()))?;
            tracing::info!("Catalog loaded: {} items from {}", catalog.len(), path.display());
            catalog
        },
        None => {
            tracing::warn!("No catalog configured, every price lookup will fail");
            CatalogPriceService::default()
        },
    }
    .with_latency(settings.catalog.latency);

    let cache = TransparentCache::from_config(Arc::new(catalog), &settings.cache);
    let prometheus_handle = init_metrics().context("failed to install metrics recorder")?;
    let addr = settings.server.socket_addr()?;

    run_server(addr, AppState::new(cache), prometheus_handle).await?;

    Ok(())
}
