//! Configuration handling for Daily CLI
//!
//! Configuration is stored in `config.toml` at the workspace root.
//! Missing files and missing keys fall back to defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Theme;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme key applied to new lists
    pub default_theme: String,

    /// Whether new lists render items with a completion glyph
    pub bullet_points: bool,

    /// How many outstanding items the summary shows
    pub pending_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_theme: "default".to_string(),
            bullet_points: true,
            pending_limit: 3,
        }
    }
}

impl Config {
    /// Loads the configuration for a workspace root
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join("config.toml");

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")
    }

    /// Returns the default theme for new lists
    pub fn default_theme(&self) -> Theme {
        Theme::from_key(&self.default_theme)
    }
}
