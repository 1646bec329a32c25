//! # CLI Configuration
//!
//! Optional YAML file supplying the registrar policy and the demo object's
//! initial state:
//!
//! ```yaml
//! registrar:
//!   duplicate_labels: reject
//! initial_state: unlocked
//! ```
//!
//! Absent keys take their defaults.

use std::path::Path;

use anyhow::Context;
use forstate_core::RegistrarConfig;
use serde::{Deserialize, Serialize};

/// Settings read from `--config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Policy applied while assembling the demo class.
    pub registrar: RegistrarConfig,
    /// State the demo object starts in when `--state` is not given.
    pub initial_state: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            registrar: RegistrarConfig::default(),
            initial_state: Some("locked".to_string()),
        }
    }
}

impl CliConfig {
    /// Parse a YAML document.
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("invalid config YAML")
    }

    /// Load from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }
}
