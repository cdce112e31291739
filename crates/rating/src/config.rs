//! Rater configuration
//!
//! Settings come from an optional TOML file:
//!
//! ```toml
//! bayeselo = "tools/bin/bayeselo"
//! json_style = "auto"
//! ```
//!
//! Missing keys fall back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backend::DEFAULT_BAYESELO;
use crate::error::{InputKind, RateError, Result};
use crate::report::JsonStyle;

/// Rater configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateConfig {
    /// Path to the BayesElo executable
    pub bayeselo: PathBuf,
    /// Layout of the JSON report
    pub json_style: JsonStyle,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            bayeselo: PathBuf::from(DEFAULT_BAYESELO),
            json_style: JsonStyle::Auto,
        }
    }
}

impl RateConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RateError::input_not_found(InputKind::Config, path, e.to_string()))?;
        Self::from_toml_str(&contents).map_err(|message| RateError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse config from TOML text
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| RateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Layer command-line and environment overrides on top of this config
    pub fn with_overrides(mut self, bayeselo: Option<PathBuf>, json_style: Option<JsonStyle>) -> Self {
        if let Some(path) = bayeselo {
            self.bayeselo = path;
        }
        if let Some(style) = json_style {
            self.json_style = style;
        }
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
