//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::task::FieldQuoting;

const APP_DIR_NAME: &str = ".todo-tracker";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    #[serde(default = "default_true")]
    pub logging_enabled: bool,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            logging_enabled: true,
            export: ExportConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from("todo_log.txt")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_basename")]
    pub default_basename: String,

    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,

    #[serde(default)]
    pub field_quoting: FieldQuoting,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_basename: default_export_basename(),
            directory: default_export_directory(),
            field_quoting: FieldQuoting::default(),
        }
    }
}

impl ExportConfig {
    /// Where an export named `basename` (without extension) lands
    pub fn path_for(&self, basename: &str, extension: &str) -> PathBuf {
        let basename = basename.trim();
        let basename = if basename.is_empty() {
            self.default_basename.as_str()
        } else {
            basename
        };
        expand_tilde(&self.directory).join(format!("{}.{}", basename, extension))
    }
}

fn default_export_basename() -> String {
    "todo_export".to_string()
}

fn default_export_directory() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_description_width")]
    pub description_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            description_width: default_description_width(),
        }
    }
}

fn default_description_width() -> usize {
    40
}

/// `~/.todo-tracker`
pub fn get_app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(APP_DIR_NAME))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

impl Config {
    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Resolved action log path, or `None` when logging is turned off
    pub fn log_path(&self) -> Option<PathBuf> {
        self.logging_enabled.then(|| expand_tilde(&self.log_file))
    }
}
