use crate::feature::FeatureRecord;
use serde::{Deserialize, Serialize};

/// categorical columns of a [`FeatureRecord`] that are one-hot encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NominalColumn {
    Station,
    FinalDestinationStation,
    TrainType,
    TrainLineStationNum,
    TempCategory,
}

/// columns of a [`FeatureRecord`] that enter the feature matrix as numbers.
/// booleans are encoded as 0.0 / 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Hour,
    Weekday,
    DepartureHour,
    Temperature2m,
    Precipitation,
    Windspeed10m,
    IsWeekend,
    IsRushHour,
    PrecipitationBinary,
}

impl NominalColumn {
    pub const ALL: [NominalColumn; 5] = [
        NominalColumn::Station,
        NominalColumn::FinalDestinationStation,
        NominalColumn::TrainType,
        NominalColumn::TrainLineStationNum,
        NominalColumn::TempCategory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NominalColumn::Station => "station",
            NominalColumn::FinalDestinationStation => "final_destination_station",
            NominalColumn::TrainType => "train_type",
            NominalColumn::TrainLineStationNum => "train_line_station_num",
            NominalColumn::TempCategory => "temp_category",
        }
    }

    /// the level of this column for a record, `None` when the value is missing.
    pub fn level(&self, record: &FeatureRecord) -> Option<String> {
        match self {
            NominalColumn::Station => Some(record.station.clone()),
            NominalColumn::FinalDestinationStation => record.final_destination_station.clone(),
            NominalColumn::TrainType => record.train_type.clone(),
            NominalColumn::TrainLineStationNum => Some(record.train_line_station_num.to_string()),
            NominalColumn::TempCategory => record.temp_category.map(|c| c.to_string()),
        }
    }
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 9] = [
        NumericColumn::Hour,
        NumericColumn::Weekday,
        NumericColumn::DepartureHour,
        NumericColumn::Temperature2m,
        NumericColumn::Precipitation,
        NumericColumn::Windspeed10m,
        NumericColumn::IsWeekend,
        NumericColumn::IsRushHour,
        NumericColumn::PrecipitationBinary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::Hour => "hour",
            NumericColumn::Weekday => "weekday",
            NumericColumn::DepartureHour => "departure_hour",
            NumericColumn::Temperature2m => "temperature_2m",
            NumericColumn::Precipitation => "precipitation",
            NumericColumn::Windspeed10m => "windspeed_10m",
            NumericColumn::IsWeekend => "is_weekend",
            NumericColumn::IsRushHour => "is_rush_hour",
            NumericColumn::PrecipitationBinary => "precipitation_binary",
        }
    }

    /// the value of this column for a record, `None` when the value is missing.
    pub fn value(&self, record: &FeatureRecord) -> Option<f64> {
        match self {
            NumericColumn::Hour => Some(record.hour as f64),
            NumericColumn::Weekday => Some(record.weekday as f64),
            NumericColumn::DepartureHour => Some(record.departure_hour as f64),
            NumericColumn::Temperature2m => record.temperature_2m,
            NumericColumn::Precipitation => record.precipitation,
            NumericColumn::Windspeed10m => record.windspeed_10m,
            NumericColumn::IsWeekend => Some(bool_value(record.is_weekend)),
            NumericColumn::IsRushHour => Some(bool_value(record.is_rush_hour)),
            NumericColumn::PrecipitationBinary => Some(bool_value(record.precipitation_binary)),
        }
    }
}

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
