use super::FeatureRecord;
use crate::model::{DelayClass, MergedRecord, TempCategory};
use chrono::{Datelike, Timelike};

/// the delay written into canceled records, which maps to [`DelayClass::Canceled`].
const CANCELED_DELAY_SENTINEL: f64 = -1.0;

/// weekdays are numbered from Monday = 0, so 5 and 6 are the weekend.
pub fn is_weekend(weekday: u32) -> bool {
    weekday >= 5
}

/// morning (07-09) and evening (16-18) peaks, both bounds inclusive.
pub fn is_rush_hour(hour: u32) -> bool {
    matches!(hour, 7..=9 | 16..=18)
}

/// derives the engineered columns for a single merged row. a running train
/// without a delay value keeps the empty delay and lands in
/// [`DelayClass::Severe`], the class NaN falls through to.
pub fn build_feature_record(merged: &MergedRecord) -> FeatureRecord {
    let train = &merged.train;
    let delay_in_min = if train.is_canceled {
        Some(CANCELED_DELAY_SENTINEL)
    } else {
        train.delay_in_min
    };

    let hour = train.time.hour();
    let departure_hour = train.departure_planned_time.hour();
    let weekday = train.departure_planned_time.weekday().num_days_from_monday();
    let temperature_2m = merged.temperature_2m();
    let precipitation = merged.precipitation();

    FeatureRecord {
        station: train.station.clone(),
        final_destination_station: train.final_destination_station.clone(),
        delay_in_min,
        time: hour,
        is_canceled: train.is_canceled,
        train_type: train.train_type.clone(),
        train_line_station_num: train.train_line_station_num,
        departure_planned_time: departure_hour,
        temperature_2m,
        precipitation,
        windspeed_10m: merged.windspeed_10m(),
        hour,
        weekday,
        departure_hour,
        delay_class: DelayClass::from_minutes(delay_in_min.unwrap_or(f64::NAN)),
        is_weekend: is_weekend(weekday),
        is_rush_hour: is_rush_hour(departure_hour),
        precipitation_binary: precipitation.map(|p| p > 0.0).unwrap_or(false),
        temp_category: temperature_2m.map(TempCategory::from_celsius),
    }
}

/// derives the engineered columns for every merged row, preserving order.
pub fn build_features(merged: &[MergedRecord]) -> Vec<FeatureRecord> {
    let records = merged.iter().map(build_feature_record).collect::<Vec<_>>();
    let missing_delay = records
        .iter()
        .filter(|r| r.delay_in_min.is_none())
        .count();
    if missing_delay > 0 {
        log::warn!("{missing_delay} running trains have no delay value, classed as severe");
    }
    log::info!("built features for {} rows", records.len());
    records
}
