//! Startup configuration: input table location and log filter.

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "geomapping.toml";
/// Input table used when neither the command line nor the config names one.
pub const DEFAULT_CSV: &str = "geomapping data.csv";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "geomapping", about = "Tiered geographic chain viewer")]
pub struct Cli {
    /// Path to the CSV of tiered points
    #[arg()]
    pub csv_path: Option<PathBuf>,
}

/// Contents of `geomapping.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub csv_path: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl FileConfig {
    /// Load configuration from a TOML file.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(config_path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load the config file if it exists; a missing file means defaults.
    pub fn load_optional(config_path: &Path) -> Result<Self, ConfigError> {
        if config_path.exists() {
            Self::load(config_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Resolved settings used by the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    /// Merge the command line with the config file.
    ///
    /// The CSV path comes from the positional argument, then the config
    /// file, then [`DEFAULT_CSV`].
    pub fn resolve(cli: Cli, file: FileConfig) -> Self {
        let csv_path = cli
            .csv_path
            .or(file.csv_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV));

        Self {
            csv_path,
            log_filter: file
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
