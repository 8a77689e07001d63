//! Application configuration.
//!
//! Read from an optional JSON file; any missing field takes its default.
//! Command line flags are applied on top in `main`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default input file.
pub const DEFAULT_DATA_PATH: &str = "population_monde.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Population CSV to load.
    pub data_path: PathBuf,
    /// File name proposed when exporting.
    pub export_file_name: String,
    /// Fixed seed for series colors; random colors on every redraw when unset.
    pub color_seed: Option<u64>,
    /// Initial window size.
    pub window_size: [f32; 2],
    /// Size of saved chart images.
    pub image_size: [u32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            export_file_name: crate::data::EXPORT_FILE_NAME.to_string(),
            color_seed: None,
            window_size: [1400.0, 800.0],
            image_size: [1200, 800],
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
