use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Sojourn configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SojournConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Estimator settings.
    #[serde(default)]
    pub estimate: EstimateToml,
}

impl SojournConfig {
    /// Reads and parses a TOML file, or returns defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub precision: Option<usize>,
    #[serde(default = "default_corner_label")]
    pub corner_label: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            delimiter: default_delimiter(),
            format: default_format(),
            precision: None,
            corner_label: default_corner_label(),
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}
fn default_format() -> String {
    "csv".to_string()
}
fn default_corner_label() -> String {
    "from".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateToml {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub has_trailing_total: bool,
}

impl Default for EstimateToml {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            has_trailing_total: false,
        }
    }
}

fn default_mode() -> String {
    "dominant".to_string()
}
