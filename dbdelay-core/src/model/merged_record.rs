use super::{TrainRecord, WeatherReading};

/// a train record joined to the most recent weather observation at or before
/// its event time. `weather` is `None` when the train precedes every observation.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub train: TrainRecord,
    pub weather: Option<WeatherReading>,
}

impl MergedRecord {
    pub fn temperature_2m(&self) -> Option<f64> {
        self.weather.and_then(|w| w.temperature_2m)
    }

    pub fn precipitation(&self) -> Option<f64> {
        self.weather.and_then(|w| w.precipitation)
    }

    pub fn windspeed_10m(&self) -> Option<f64> {
        self.weather.and_then(|w| w.windspeed_10m)
    }
}
