use dbdelay_core::model::WeatherSample;
use std::path::Path;
use std::time::Instant;

use super::{OpenMeteoResponse, WeatherQuery, WeatherSource};
use crate::collection::CollectionError;
use crate::output;

/// retrieves the hourly weather series for a query from the configured source.
pub fn fetch_weather(
    source: &WeatherSource,
    query: &WeatherQuery,
) -> Result<Vec<WeatherSample>, CollectionError> {
    let start = Instant::now();
    let body = match source {
        WeatherSource::Api {
            base_url,
            cache_file,
        } => {
            let url = query.url(base_url)?;
            log::info!("requesting hourly weather from {url}");
            let body = reqwest::blocking::get(url.clone())
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.text())
                .map_err(|e| CollectionError::WeatherRequestError(format!("{url}: {e}")))?;
            if let Some(cache_file) = cache_file {
                write_cache(cache_file, &body)?;
            }
            body
        }
        WeatherSource::File { path } => {
            log::info!("reading hourly weather from {}", path.display());
            std::fs::read_to_string(path).map_err(|source| CollectionError::FileOpenError {
                path: path.display().to_string(),
                source,
            })?
        }
    };
    let samples = parse_weather_json(&body)?;
    log::info!(
        "loaded {} hourly weather samples in {:?}",
        samples.len(),
        start.elapsed()
    );
    Ok(samples)
}

/// parses an Open-Meteo archive response body into weather samples.
pub fn parse_weather_json(body: &str) -> Result<Vec<WeatherSample>, CollectionError> {
    let response: OpenMeteoResponse = serde_json::from_str(body)
        .map_err(|e| CollectionError::WeatherDeserializeError(e.to_string()))?;
    if let Some(timezone) = &response.timezone {
        log::debug!("weather response timezone: {timezone}");
    }
    response.hourly.into_samples()
}

fn write_cache(path: &Path, body: &str) -> Result<(), CollectionError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        output::create_dirs(parent)?;
    }
    std::fs::write(path, body).map_err(|source| CollectionError::FileWriteError {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("cached weather response at {}", path.display());
    Ok(())
}
