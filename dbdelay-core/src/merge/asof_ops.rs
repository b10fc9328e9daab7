use crate::model::{MergedRecord, TrainRecord, WeatherSample};

/// joins each train record to the latest weather sample observed at or before
/// the train's event time (a backward as-of join). both inputs are sorted by
/// time, preserving the input order of equal timestamps, and the result
/// follows the sorted train order. when several samples share the matching
/// timestamp, the last one wins. trains that precede the first sample receive
/// no weather.
pub fn merge_asof(
    mut trains: Vec<TrainRecord>,
    mut weather: Vec<WeatherSample>,
) -> Vec<MergedRecord> {
    trains.sort_by_key(|t| t.time);
    weather.sort_by_key(|w| w.time);

    let mut cursor = 0;
    let mut matched: Option<usize> = None;
    let merged: Vec<MergedRecord> = trains
        .into_iter()
        .map(|train| {
            while cursor < weather.len() && weather[cursor].time <= train.time {
                matched = Some(cursor);
                cursor += 1;
            }
            MergedRecord {
                weather: matched.map(|idx| weather[idx].reading()),
                train,
            }
        })
        .collect();

    let unmatched = merged.iter().filter(|m| m.weather.is_none()).count();
    log::debug!(
        "as-of merge produced {} rows, {} without a prior weather sample",
        merged.len(),
        unmatched
    );
    merged
}
