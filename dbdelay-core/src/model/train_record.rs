use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// the columns of the train dataset used for delay modeling, in the order
/// they appear in a [`TrainRecord`].
pub const TRAIN_RECORD_COLUMNS: [&str; 8] = [
    "station",
    "final_destination_station",
    "delay_in_min",
    "time",
    "is_canceled",
    "train_type",
    "train_line_station_num",
    "departure_planned_time",
];

/// a single train event observed at a station.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrainRecord {
    /// the station where this event was recorded
    pub station: String,
    /// the last station served by this train, if the source has one
    pub final_destination_station: Option<String>,
    /// delay in minutes. the source leaves this empty for some canceled trains.
    pub delay_in_min: Option<f64>,
    /// actual time of the event at this station, in local time
    pub time: NaiveDateTime,
    pub is_canceled: bool,
    /// train category, such as "ICE", "RE" or "S"
    pub train_type: Option<String>,
    /// index of this station along the line of the train
    pub train_line_station_num: i64,
    /// scheduled departure from this station, in local time
    pub departure_planned_time: NaiveDateTime,
}
