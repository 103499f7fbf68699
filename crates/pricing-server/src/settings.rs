//! Server settings.
//!
//! Layered with the `config` crate, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. Optional YAML file
//! 3. Environment variables prefixed `PRICING__`, using `__` as separator
//!    (`PRICING__CACHE__MAX_AGE=30s`, `PRICING__SERVER__PORT=9090`)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use pricing_cache::CacheConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl SettingsError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Full server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub cache: CacheConfig,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Listen address.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// IP address to bind (default: 0.0.0.0)
    pub host: String,
    /// Port to bind (default: 8080)
    pub port: u16,
}

/// Where the upstream catalog comes from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// YAML file with the item prices. Without one every lookup fails.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Simulated latency of each upstream lookup.
    #[serde(default, with = "humantime_serde")]
    pub latency: Duration,
}

impl Settings {
    /// Loads settings from defaults, the optional file at `path` and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("cache.max_age", "1m")?
            .set_default("catalog.latency", "0s")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("PRICING")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks values that deserialize fine but can't be used.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server.port == 0 {
            return Err(SettingsError::invalid("server.port", "must not be 0"));
        }
        self.server.socket_addr()?;
        Ok(())
    }
}

impl ServerSettings {
    /// Returns the address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        format!("{}:{}", self.host, self.port).parse().map_err(|_| {
            SettingsError::invalid(
                "server.host",
                format!("'{}' is not an IP address", self.host),
            )
        })
    }
}
