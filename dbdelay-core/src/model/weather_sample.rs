use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// an hourly weather observation at a fixed coordinate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeatherSample {
    /// start of the hour this observation covers, in local time
    pub time: NaiveDateTime,
    /// air temperature at 2 meters in degrees Celsius
    pub temperature_2m: Option<f64>,
    /// precipitation sum over the preceding hour in millimeters
    pub precipitation: Option<f64>,
    /// wind speed at 10 meters in km/h
    pub windspeed_10m: Option<f64>,
}

/// the weather values of a [`WeatherSample`] once it has been attached to a
/// train record. the observation time is not carried along.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct WeatherReading {
    pub temperature_2m: Option<f64>,
    pub precipitation: Option<f64>,
    pub windspeed_10m: Option<f64>,
}

impl WeatherSample {
    pub fn reading(&self) -> WeatherReading {
        WeatherReading {
            temperature_2m: self.temperature_2m,
            precipitation: self.precipitation,
            windspeed_10m: self.windspeed_10m,
        }
    }
}
