use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::OPEN_METEO_ARCHIVE_URL;

/// where hourly weather is read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum WeatherSource {
    /// the Open-Meteo archive API. if `cache_file` is set, the raw response
    /// body is written there after a successful request.
    Api {
        base_url: String,
        cache_file: Option<PathBuf>,
    },
    /// a previously saved archive API response
    File { path: PathBuf },
}

impl Default for WeatherSource {
    fn default() -> Self {
        WeatherSource::Api {
            base_url: String::from(OPEN_METEO_ARCHIVE_URL),
            cache_file: None,
        }
    }
}
