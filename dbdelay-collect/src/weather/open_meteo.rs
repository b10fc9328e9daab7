use chrono::NaiveDateTime;
use dbdelay_core::model::WeatherSample;
use serde::{Deserialize, Serialize};

use crate::collection::CollectionError;

/// the fields of an Open-Meteo archive response used by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub hourly: OpenMeteoHourly,
}

/// hourly series as parallel arrays. missing observations are `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoHourly {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub windspeed_10m: Vec<Option<f64>>,
}

const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

impl OpenMeteoHourly {
    /// zips the parallel arrays into samples. all series must have one value
    /// per timestamp.
    pub fn into_samples(self) -> Result<Vec<WeatherSample>, CollectionError> {
        let expected = self.time.len();
        for (column, found) in [
            ("temperature_2m", self.temperature_2m.len()),
            ("precipitation", self.precipitation.len()),
            ("windspeed_10m", self.windspeed_10m.len()),
        ] {
            if found != expected {
                return Err(CollectionError::WeatherSeriesLengthError {
                    column: column.to_string(),
                    expected,
                    found,
                });
            }
        }

        self.time
            .iter()
            .zip(self.temperature_2m)
            .zip(self.precipitation)
            .zip(self.windspeed_10m)
            .map(|(((time, temperature_2m), precipitation), windspeed_10m)| {
                Ok(WeatherSample {
                    time: parse_time(time)?,
                    temperature_2m,
                    precipitation,
                    windspeed_10m,
                })
            })
            .collect()
    }
}

fn parse_time(value: &str) -> Result<NaiveDateTime, CollectionError> {
    let mut last_error = None;
    for format in TIME_FORMATS {
        match NaiveDateTime::parse_from_str(value, format) {
            Ok(time) => return Ok(time),
            Err(e) => last_error = Some(e),
        }
    }
    match last_error {
        Some(source) => Err(CollectionError::WeatherTimestampError {
            value: value.to_string(),
            source,
        }),
        None => Err(CollectionError::InvalidUserInput(format!(
            "no timestamp formats to parse '{value}'"
        ))),
    }
}
