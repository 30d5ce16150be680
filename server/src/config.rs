//! # Server Configuration
//!
//! Settings are read from a YAML file (`providence.yaml` in the working
//! directory, or the path in `PROVIDENCE_CONFIG`). Every field has a
//! default, so a missing file or a partial file is fine.
//!
//! ## YAML Format
//!
//! ```yaml
//! bind_address: "0.0.0.0:8001"
//! data_directory: "/var/lib/providence"
//! cors_origin: "http://localhost:3000"
//! seed_sample_data: true
//! classification:
//!   piglet_max_days: 60
//!   grower_max_days: 180
//!   chick_max_days: 90
//! gestation:
//!   pig_days: 114
//!   poultry_days: 21
//! market_prices:
//!   pig_per_kg: 1500
//!   poultry_per_kg: 2500
//! ```
//!
//! `PROVIDENCE_DATA_DIR` and `PROVIDENCE_BIND` override the file.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::domain::{ClassificationThresholds, GestationPeriods, MarketPrices};

pub const CONFIG_FILE: &str = "providence.yaml";
pub const CONFIG_PATH_VAR: &str = "PROVIDENCE_CONFIG";
pub const DATA_DIR_VAR: &str = "PROVIDENCE_DATA_DIR";
pub const BIND_VAR: &str = "PROVIDENCE_BIND";

const DATA_DIRECTORY_NAME: &str = "Elevage la Providence";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub data_directory: PathBuf,
    /// Allowed browser origin; any origin when absent
    pub cors_origin: Option<String>,
    /// Insert the demonstration herd when the store is empty
    pub seed_sample_data: bool,
    pub classification: ClassificationThresholds,
    pub gestation: GestationPeriods,
    pub market_prices: MarketPrices,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8001".to_string(),
            data_directory: default_data_directory(),
            cors_origin: None,
            seed_sample_data: true,
            classification: ClassificationThresholds::default(),
            gestation: GestationPeriods::default(),
            market_prices: MarketPrices::default(),
        }
    }
}

/// `{platform data dir}/Elevage la Providence`, or `./data` when the
/// platform has none
pub fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIRECTORY_NAME))
        .unwrap_or_else(|| PathBuf::from("data"))
}

impl ServerConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid server configuration")
    }

    /// Read a config file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No configuration file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from `lookup` (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            self.data_directory = PathBuf::from(dir);
        }
        if let Some(bind) = lookup(BIND_VAR).filter(|v| !v.trim().is_empty()) {
            self.bind_address = bind;
        }
    }

    /// Configuration of the running process: file, then environment
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE));

        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }
}
