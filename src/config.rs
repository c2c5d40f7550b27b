//! Application configuration
//!
//! TOML file (`dashboard.toml` in the working directory) with defaults for
//! missing values, then environment overrides, then validation.

use crate::data::YearRange;
use crate::pipeline::DEFAULT_PREVIEW_ROWS;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "dashboard.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV with the monthly waste series
    pub data_path: PathBuf,
    /// Rows shown in the table preview
    pub preview_rows: usize,
    /// Where chart images and JSON reports are written
    pub export_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    /// Initial year bounds, parsed like query values
    pub year_from: Option<String>,
    pub year_to: Option<String>,
    /// Default tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("hasil_simulasi_sampah_bandung.csv"),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            export_dir: PathBuf::from("exports"),
            chart_width: 1200,
            chart_height: 600,
            year_from: None,
            year_to: None,
            log_filter: "waste_dashboard=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `dashboard.toml` if present, otherwise defaults.
    pub fn load() -> ConfigResult<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::load_from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        debug!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// Parse without env overrides or validation.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("WASTE_DATA_PATH") {
            if !val.trim().is_empty() {
                self.data_path = PathBuf::from(val);
            }
        }

        if let Ok(val) = env::var("WASTE_PREVIEW_ROWS") {
            match val.trim().parse::<usize>() {
                Ok(rows) => self.preview_rows = rows,
                Err(e) => warn!(value = %val, error = %e, "ignoring invalid WASTE_PREVIEW_ROWS"),
            }
        }

        if let Ok(val) = env::var("WASTE_EXPORT_DIR") {
            if !val.trim().is_empty() {
                self.export_dir = PathBuf::from(val);
            }
        }

        if let Ok(val) = env::var("WASTE_YEAR_FROM") {
            self.year_from = Some(val);
        }

        if let Ok(val) = env::var("WASTE_YEAR_TO") {
            self.year_to = Some(val);
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.preview_rows == 0 {
            return Err(ConfigError::Validation(
                "preview_rows must be greater than 0".to_string(),
            ));
        }

        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigError::Validation(
                "chart_width and chart_height must be greater than 0".to_string(),
            ));
        }

        if self.data_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("data_path must not be empty".to_string()));
        }

        Ok(())
    }

    /// Initial filter from `year_from` / `year_to`.
    pub fn initial_range(&self) -> YearRange {
        YearRange::parse(self.year_from.as_deref(), self.year_to.as_deref())
    }
}
