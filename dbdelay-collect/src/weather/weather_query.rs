use chrono::NaiveDate;
use itertools::Itertools;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::collection::CollectionError;

pub const OPEN_METEO_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// hourly series requested from the archive, matching the fields of
/// [`super::OpenMeteoHourly`].
pub const HOURLY_VARIABLES: [&str; 3] = ["temperature_2m", "precipitation", "windspeed_10m"];

/// location and date range of an hourly weather request. dates are inclusive
/// and timestamps in the response are in `timezone`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timezone: String,
}

impl WeatherQuery {
    /// builds the request URL for this query against an archive endpoint.
    pub fn url(&self, base_url: &str) -> Result<Url, CollectionError> {
        if self.end_date < self.start_date {
            return Err(CollectionError::InvalidUserInput(format!(
                "weather end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }
        let params = [
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("start_date", self.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", self.end_date.format("%Y-%m-%d").to_string()),
            ("hourly", HOURLY_VARIABLES.iter().join(",")),
            ("timezone", self.timezone.clone()),
        ];
        Url::parse_with_params(base_url, &params)
            .map_err(|e| CollectionError::WeatherUrlError(format!("{base_url}: {e}")))
    }
}
