use crate::analysis::AnalysisMode;
use crate::catalog;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User settings, read from `<config dir>/snp-cli/config.json` when present.
/// The file is never written by the application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_ticker")]
    pub default_ticker: String,
    #[serde(default)]
    pub default_mode: AnalysisMode,
    /// Price history window passed to the provider (Yahoo `range`).
    #[serde(default = "default_history_range")]
    pub history_range: String,
    #[serde(default = "default_history_interval")]
    pub history_interval: String,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_ticker() -> String {
    catalog::SP500_COMPANIES[0].0.to_string()
}

fn default_history_range() -> String {
    "1y".to_string()
}

fn default_history_interval() -> String {
    "1d".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ticker: default_ticker(),
            default_mode: AnalysisMode::default(),
            history_range: default_history_range(),
            history_interval: default_history_interval(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("snp-cli"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn default_log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("snp-cli.log"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Upper-cases the ticker and falls back to the first catalog entry when
    /// it is not offered by the picker.
    pub fn normalize(&mut self) {
        self.default_ticker = self.default_ticker.trim().to_uppercase();
        if !catalog::contains(&self.default_ticker) {
            self.default_ticker = default_ticker();
        }
    }

    pub fn test_config() -> Self {
        Config::default()
    }
}
