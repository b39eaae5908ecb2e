//! Application Configuration
//!
//! Layered configuration: `crm.toml` in the working directory, overridden
//! by `CRM_*` environment variables (e.g. `CRM_SEARCH__ARTISAN_LIMIT=5`).
//! Every field has a default so the binary runs with no config at all.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub search: SearchConfig,
}

/// Database location configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
}

/// Default per-type result limits for universal search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Default artisan group size when the caller supplies no limit.
    pub artisan_limit: usize,
    /// Default intervention group size when the caller supplies no limit.
    pub intervention_limit: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("artisan_crm.db"),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            artisan_limit: 3,
            intervention_limit: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from `crm.toml` and `CRM_*` environment
    /// variables.
    pub fn load() -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::file("crm.toml"))
            .merge(Env::prefixed("CRM_").split("__"))
            .extract()?;
        Ok(config)
    }
}
