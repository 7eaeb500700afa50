use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::system_monitor::alerts;

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV_VAR: &str = "PROCINTEL_CONFIG";

/// Runtime configuration. Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default `n` for the top-processes ranking
    pub top_n: usize,
    /// Default sampling delay (seconds) between CPU baseline and measurement
    pub top_delay_secs: f64,
    /// Longest sampling delay a caller may request
    pub max_delay_secs: f64,
    /// Default threshold (%) for spike detection
    pub spike_threshold: u8,
    pub anomaly: AnomalyConfig,
    /// Path whose filesystem is reported by disk usage
    pub disk_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Resident memory (decimal MB) above which a quiet process is suspicious
    pub memory_mb: f64,
    /// CPU (%) below which a large process counts as quiet
    pub cpu_percent: f32,
    /// CPU baseline window taken before classification, in milliseconds
    pub sample_window_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_n: 10,
            top_delay_secs: 1.0,
            max_delay_secs: 60.0,
            spike_threshold: 80,
            anomaly: AnomalyConfig::default(),
            disk_path: "/".to_string(),
        }
    }
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            memory_mb: 1000.0,
            cpu_percent: 1.0,
            sample_window_ms: 500,
        }
    }
}

impl Config {
    /// Load from the explicit path, then `$PROCINTEL_CONFIG`, then the user config dir.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("No config directory available, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load a config file. A missing file yields defaults; an empty or
    /// unparsable one is reported and replaced by defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Config file {:?} not found, using defaults", path);
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            log::warn!("Config file {:?} is empty, using defaults", path);
            return Ok(Config::default());
        }

        let config: Config = serde_json::from_str(&data).unwrap_or_else(|e| {
            log::warn!("Failed to parse config {:?}: {}, using defaults", path, e);
            Config::default()
        });

        Ok(config.validated())
    }

    /// Replace out-of-range values with their defaults
    fn validated(mut self) -> Self {
        if let Err(e) = alerts::validate_threshold(i64::from(self.spike_threshold)) {
            let fallback = Config::default().spike_threshold;
            log::warn!("Config spike_threshold: {}, using {}", e, fallback);
            self.spike_threshold = fallback;
        }
        self
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, data)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        Self::default_path()
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("procintel").join("config.json"))
    }
}
