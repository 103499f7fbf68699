//! Catalog-backed upstream price service.
//!
//! Stands in for a real pricing backend: prices come from a YAML table and
//! every lookup can be slowed down to simulate an expensive remote call.
//!
//! ```yaml
//! prices:
//!   p1: 5.0
//!   p2: 7.25
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pricing_core::{Price, PriceService, ServiceError};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    prices: HashMap<String, Price>,
}

/// Price service answering from an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct CatalogPriceService {
    prices: HashMap<String, Price>,
    latency: Duration,
}

impl CatalogPriceService {
    /// Creates a catalog from `(item_code, price)` pairs.
    pub fn from_prices<K: Into<String>>(prices: impl IntoIterator<Item = (K, Price)>) -> Self {
        Self {
            prices: prices.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            latency: Duration::ZERO,
        }
    }

    /// Parses a catalog from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Ok(Self::from_prices(file.prices))
    }

    /// Reads and parses a catalog file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_yaml_str(&content)
    }

    /// Makes every lookup wait `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl PriceService for CatalogPriceService {
    async fn get_price_for(&self, item_code: &str) -> Result<Price, ServiceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        debug!(item_code = %item_code, "Catalog lookup");

        self.prices
            .get(item_code)
            .copied()
            .ok_or_else(|| ServiceError::item_not_found(item_code))
    }

    fn name(&self) -> &str {
        "catalog"
    }
}
