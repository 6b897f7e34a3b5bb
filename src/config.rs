//! Laminate demo configuration
//!
//! Loaded from TOML at startup, falls back to defaults if no config file
//! exists. The `[layer]` table holds the options passed to every layer
//! application; unknown keys there are rejected as unsupported configuration.

use anyhow::Context;
use laminate_core::LayerOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LaminateConfig {
    /// Options for every layer application.
    pub layer: LayerOptions,
    /// What the demo loads and how it layers it.
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Record id passed to `Game.find`.
    pub id: u64,
    /// Capability modules to apply, in order. Full or short names.
    pub layers: Vec<String>,
    /// Apply every module in a single layer instead of one layer each.
    pub combined: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            id: 123,
            layers: vec!["Lpis".into(), "BrainAreas".into()],
            combined: false,
        }
    }
}

impl LaminateConfig {
    /// Load from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let mut table: toml::Table = toml::from_str(content)?;
        let layer = match table.remove("layer") {
            Some(value) => serde_json::to_value(value)?,
            None => serde_json::Value::Null,
        };
        let layer = LayerOptions::from_value(layer)?;
        let mut config: Self = toml::Value::Table(table).try_into()?;
        config.layer = layer;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
