//! Project configuration
//!
//! A YAML (or JSON) file at the project root, created with defaults on
//! first run. Every section and field has a serde default so a partial
//! file is always usable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};
use crate::ui;

/// Default configuration file name at the project root
pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    pub gui: GuiConfig,
    pub security: SecurityConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            file: None,
        }
    }
}

/// Network behavior for remote calls, including the package index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub timeout: u64,
    pub max_retries: u32,
    pub retry_delay: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            max_retries: 3,
            retry_delay: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub click_delay: f64,
    pub typing_delay: f64,
    pub screenshot_quality: u8,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            click_delay: 0.1,
            typing_delay: 0.05,
            screenshot_quality: 95,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub coordinate_validation: bool,
    pub max_text_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            coordinate_validation: true,
            max_text_length: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub task_timeout: u64,
    pub install_timeout: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            task_timeout: 300,
            install_timeout: 600,
        }
    }
}

impl Config {
    /// Load the configuration, writing a default file when none exists yet.
    /// The serialization format follows the file extension (.json is JSON,
    /// everything else is YAML).
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.write(path)?;
            ui::status(&format!("wrote default configuration to {}", path.display()));
            return Ok(config);
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            error::config_read_failed(path.display().to_string(), e.to_string())
        })?;
        Self::parse(path, &text)
    }

    fn parse(path: &Path, text: &str) -> Result<Self> {
        if is_json(path) {
            serde_json::from_str(text).map_err(|e| {
                error::config_parse_failed(path.display().to_string(), e.to_string())
            })
        } else {
            serde_yaml::from_str(text).map_err(|e| {
                error::config_parse_failed(path.display().to_string(), e.to_string())
            })
        }
    }

    fn write(&self, path: &Path) -> Result<()> {
        let text = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| {
                error::config_parse_failed(path.display().to_string(), e.to_string())
            })?
        } else {
            serde_yaml::to_string(self).map_err(|e| {
                error::config_parse_failed(path.display().to_string(), e.to_string())
            })?
        };
        std::fs::write(path, text).map_err(|e| {
            error::config_read_failed(path.display().to_string(), e.to_string())
        })
    }

    /// Environment overrides take precedence over the file
    pub fn apply_env(&mut self) {
        if let Ok(level) = std::env::var("ENVPREP_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.logging.level = level.trim().to_lowercase();
            }
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Resolve the configuration path: ENVPREP_CONFIG wins, otherwise
/// `<project>/config.yaml`.
pub fn config_path(project: &Path) -> PathBuf {
    match std::env::var_os("ENVPREP_CONFIG") {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => project.join(CONFIG_FILE),
    }
}
