//! TOML configuration of the service.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cinebus_core::CityModelConfig;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Whole configuration file.
///
/// ```toml
/// screenings = "data/screenings.csv"
///
/// [server]
/// bind = "0.0.0.0:3000"
///
/// [model]
/// street_nodes_path = "data/nodes.csv"
/// street_edges_path = "data/edges.csv"
/// transit_path = "data/buses.json"
/// municipality = "Barcelona"
///
/// [model.params]
/// boarding_overhead = 300
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Billboard CSV; without it the screening endpoint finds nothing
    #[serde(default)]
    pub screenings: Option<PathBuf>,
    #[serde(default)]
    pub server: ServerSettings,
    pub model: CityModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Requests handled at once; the rest wait
    pub concurrency_limit: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            request_timeout: 30,
            concurrency_limit: 64,
        }
    }
}

impl ServerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.max(1))
    }
}

impl ServiceConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
