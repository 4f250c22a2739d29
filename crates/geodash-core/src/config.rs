// crates/geodash-core/src/config.rs

//! Session configuration.
//!
//! Every field has a default, so an empty JSON object (or no config file at
//! all) is a valid configuration.

use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Seed for the synthetic generator. `None` draws from OS entropy
    /// (or a fixed fallback seed when the `os-rng` feature is off).
    pub seed: Option<u64>,
    /// Rows in the top-N bar chart.
    pub top_n: usize,
    /// Debounce window for the year / financial-year / sector selectors.
    pub debounce_ms: u64,
    pub generator: GeneratorConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            seed: None,
            top_n: 10,
            debounce_ms: 250,
            generator: GeneratorConfig::default(),
        }
    }
}

/// Knobs of the synthetic metrics generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Lower bound of the per-feature regional bias.
    pub bias_min: f64,
    /// Upper bound of the per-feature regional bias.
    pub bias_max: f64,
    /// Relative per-bag noise: each bag is scaled by `U(1 - jitter, 1 + jitter)`.
    pub jitter: f64,
    /// Split each district's figures across its sub-districts instead of
    /// generating sub-districts independently.
    pub derive_sub_districts: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            bias_min: 0.6,
            bias_max: 1.4,
            jitter: 0.15,
            derive_sub_districts: true,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DashError::NotFound(format!("Config not found at {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let g = &self.generator;
        if !(g.bias_min > 0.0 && g.bias_min <= g.bias_max && g.bias_max.is_finite()) {
            return Err(DashError::InvalidData(format!(
                "regional bias range {}..{} is invalid",
                g.bias_min, g.bias_max
            )));
        }
        if !(0.0..1.0).contains(&g.jitter) {
            return Err(DashError::InvalidData(format!(
                "jitter {} must be in [0, 1)",
                g.jitter
            )));
        }
        if self.top_n == 0 {
            return Err(DashError::InvalidData("top_n must be positive".into()));
        }
        Ok(())
    }
}
