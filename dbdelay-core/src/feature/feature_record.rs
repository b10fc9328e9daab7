use crate::model::{DelayClass, TempCategory};
use serde::Serialize;

/// a merged train/weather row with all derived columns attached. field order
/// is the column order of the merged CSV output.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub station: String,
    pub final_destination_station: Option<String>,
    /// delay in minutes, -1 for canceled trains. empty when a running train
    /// has no delay value.
    pub delay_in_min: Option<f64>,
    /// hour of the event time
    pub time: u32,
    pub is_canceled: bool,
    pub train_type: Option<String>,
    pub train_line_station_num: i64,
    /// hour of the scheduled departure
    pub departure_planned_time: u32,
    pub temperature_2m: Option<f64>,
    pub precipitation: Option<f64>,
    pub windspeed_10m: Option<f64>,
    pub hour: u32,
    /// day of the week of the scheduled departure, Monday = 0
    pub weekday: u32,
    pub departure_hour: u32,
    pub delay_class: DelayClass,
    pub is_weekend: bool,
    pub is_rush_hour: bool,
    pub precipitation_binary: bool,
    pub temp_category: Option<TempCategory>,
}

impl FeatureRecord {
    /// true if this row was joined to a weather sample with all values present.
    pub fn has_complete_weather(&self) -> bool {
        self.temperature_2m.is_some() && self.precipitation.is_some() && self.windspeed_10m.is_some()
    }
}
