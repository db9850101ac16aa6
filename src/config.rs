//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional JSON file,
//! then command-line overrides applied by the CLI. Every field has a default,
//! so a config file only needs the values it changes.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DASH_LENGTH, DEFAULT_DASH_SPACING,
    DEFAULT_LOG_LEVEL, DEFAULT_MARKER_SIZE, DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Log levels accepted in the `logging.level` field
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Mass-balance chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Chart width in pixels
    pub width: u32,

    /// Chart height in pixels
    pub height: u32,

    /// Half-size of the cross marker drawn at each measurement
    pub marker_size: u32,

    /// Dash length of the connecting line
    pub dash_length: u32,

    /// Gap between dashes of the connecting line
    pub dash_spacing: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLOT_WIDTH,
            height: DEFAULT_PLOT_HEIGHT,
            marker_size: DEFAULT_MARKER_SIZE,
            dash_length: DEFAULT_DASH_LENGTH,
            dash_spacing: DEFAULT_DASH_SPACING,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when neither RUST_LOG nor -v/-q is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub plot: PlotConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Platform config file location, e.g. `~/.config/glacier-analysis/config.json`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load defaults overlaid with a config file
    ///
    /// An explicit `config_file` must exist. Without one, the platform default
    /// location is used when present, otherwise plain defaults.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Set the chart size in pixels
    pub fn with_plot_size(mut self, width: u32, height: u32) -> Self {
        self.plot.width = width;
        self.plot.height = height;
        self
    }

    /// Set the marker half-size in pixels
    pub fn with_marker_size(mut self, marker_size: u32) -> Self {
        self.plot.marker_size = marker_size;
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(Error::configuration(format!(
                "Plot size must be non-zero, got {}x{}",
                self.plot.width, self.plot.height
            )));
        }

        if self.plot.marker_size == 0 {
            return Err(Error::configuration("Plot marker size must be non-zero"));
        }

        if self.plot.dash_length == 0 {
            return Err(Error::configuration("Plot dash length must be non-zero"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::configuration(format!(
                "Unknown log level '{}', expected one of {:?}",
                self.logging.level, LOG_LEVELS
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.plot.width, DEFAULT_PLOT_WIDTH);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_builder_methods() {
        let config = Config::default()
            .with_plot_size(1024, 768)
            .with_marker_size(6)
            .with_log_level("debug");

        assert_eq!(config.plot.width, 1024);
        assert_eq!(config.plot.height, 768);
        assert_eq!(config.plot.marker_size, 6);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::default().with_plot_size(0, 600).validate().is_err());
        assert!(Config::default().with_marker_size(0).validate().is_err());
        assert!(matches!(
            Config::default().with_log_level("loud").validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_partial_config_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "plot": { "width": 1200 } }"#).unwrap();

        let config = Config::load_layered(Some(&path)).unwrap();
        assert_eq!(config.plot.width, 1200);
        assert_eq!(config.plot.height, DEFAULT_PLOT_HEIGHT);
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load_layered(Some(&path)),
            Err(Error::Configuration { .. })
        ));

        fs::write(&path, r#"{ "plot": { "height": 0 } }"#).unwrap();
        assert!(matches!(
            Config::load_layered(Some(&path)),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_config_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        assert!(matches!(
            Config::load_layered(Some(&path)),
            Err(Error::Io { .. })
        ));
    }
}
