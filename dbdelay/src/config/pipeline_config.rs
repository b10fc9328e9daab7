use ::config::{Config, File, FileFormat};
use dbdelay_collect::weather::{WeatherQuery, WeatherSource};
use dbdelay_forest::model::ForestConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app::AppError;

/// default configuration, overridden key by key by a user file.
pub const DEFAULT_CONFIG: &str = include_str!("dbdelay-config.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: InputConfig,
    pub weather: WeatherConfig,
    pub output: OutputConfig,
    pub split: SplitConfig,
    pub forest: ForestConfig,
    pub report: ReportConfig,
}

/// train record source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: PathBuf,
    /// only rows of this station are loaded
    pub station: String,
    /// rows per parquet record batch
    pub batch_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub query: WeatherQuery,
    pub source: WeatherSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV dump of the merged, feature-engineered rows
    pub merged_csv: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    pub test_ratio: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// number of ranked feature importances printed
    pub top_features: usize,
}

impl PipelineConfig {
    /// reads the default configuration and, if provided, a TOML file whose
    /// keys replace the defaults.
    pub fn load(path: Option<&Path>) -> Result<PipelineConfig, AppError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(path) = path {
            log::info!("reading dbdelay configuration from {}", path.display());
            let filepath = path.to_string_lossy();
            builder = builder.add_source(File::new(&filepath, FileFormat::Toml));
        }
        let config = builder.build().map_err(|e| AppError::ConfigReadError {
            msg: String::from("failed reading dbdelay configuration"),
            source: e,
        })?;
        config
            .try_deserialize::<PipelineConfig>()
            .map_err(|e| AppError::ConfigReadError {
                msg: String::from("failed decoding dbdelay configuration"),
                source: e,
            })
    }
}
