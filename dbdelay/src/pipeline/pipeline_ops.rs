use dbdelay_collect::{collection::TrainRecordCollector, output::write_csv, weather::fetch_weather};
use dbdelay_core::{
    encode::{NominalColumn, NumericColumn, OneHotEncoder},
    feature::{build_features, FeatureRecord},
    merge::merge_asof,
};
use dbdelay_forest::{
    metrics::{ClassificationReport, ConfusionMatrix},
    model::RandomForest,
};
use std::time::Instant;

use super::Evaluation;
use crate::{app::AppError, config::PipelineConfig};

/// runs every stage: load, fetch weather, merge, build features, write the
/// merged CSV, then train and evaluate.
pub fn run(config: &PipelineConfig) -> Result<Evaluation, AppError> {
    let start = Instant::now();
    let features = prepare(config)?;
    let evaluation = train_and_evaluate(&features, config)?;
    log::info!("pipeline finished in {:?}", start.elapsed());
    Ok(evaluation)
}

/// loads the station's train records, joins each to the latest prior hourly
/// weather sample, derives the feature columns and writes them to the
/// configured CSV file.
pub fn prepare(config: &PipelineConfig) -> Result<Vec<FeatureRecord>, AppError> {
    let collector = TrainRecordCollector::new(config.input.batch_size);
    let trains = collector.collect_from_path(&config.input.path, Some(&config.input.station))?;
    let weather = fetch_weather(&config.weather.source, &config.weather.query)?;

    let merged = merge_asof(trains, weather);
    let n_unmatched = merged.iter().filter(|m| m.weather.is_none()).count();
    if n_unmatched > 0 {
        log::info!("{n_unmatched} train records precede the first weather sample");
    }

    let features = build_features(&merged);
    write_csv(&features, &config.output.merged_csv)?;
    Ok(features)
}

/// one-hot encodes the feature rows, splits them into train and test sets,
/// fits the random forest and scores it on the test set.
pub fn train_and_evaluate(
    features: &[FeatureRecord],
    config: &PipelineConfig,
) -> Result<Evaluation, AppError> {
    let encoder = OneHotEncoder::fit(features, &NumericColumn::ALL, &NominalColumn::ALL, true);
    let dataset = encoder.transform(features);
    if dataset.is_empty() {
        return Err(AppError::EmptyDatasetError(features.len()));
    }
    log::info!(
        "encoded {} rows into {} features, class counts {:?}",
        dataset.n_samples(),
        dataset.n_features(),
        dataset.class_counts()
    );

    let split = dataset.train_test_split(config.split.test_ratio, config.split.seed)?;
    log::info!(
        "split into {} training and {} test rows",
        split.train.n_samples(),
        split.test.n_samples()
    );

    let mut forest = RandomForest::new(config.forest.clone());
    forest.fit(&split.train)?;
    let predictions = forest.predict(&split.test)?;

    let confusion_matrix = ConfusionMatrix::from_predictions(&split.test.labels, &predictions)?;
    let report = ClassificationReport::from_confusion_matrix(&confusion_matrix);
    log::info!("test accuracy: {:.4}", report.accuracy);

    let top_features = forest
        .feature_importance_ranking()
        .into_iter()
        .take(config.report.top_features)
        .map(|(name, importance)| (name.to_string(), importance))
        .collect();

    Ok(Evaluation {
        n_train: split.train.n_samples(),
        n_test: split.test.n_samples(),
        confusion_matrix,
        report,
        top_features,
    })
}

#[cfg(test)]
mod test {
    use super::{run, train_and_evaluate};
    use crate::{app::AppError, config::PipelineConfig};
    use arrow::{
        array::{
            ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray,
            TimestampMicrosecondArray,
        },
        datatypes::{DataType, Field, Schema, TimeUnit},
    };
    use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
    use dbdelay_collect::weather::WeatherSource;
    use dbdelay_core::{
        feature::{is_rush_hour, is_weekend, FeatureRecord},
        model::{DelayClass, TempCategory},
    };
    use parquet::arrow::ArrowWriter;
    use std::{fs::File, path::Path, sync::Arc};

    const MERGED_CSV_HEADER: &str = "station,final_destination_station,delay_in_min,time,\
is_canceled,train_type,train_line_station_num,departure_planned_time,temperature_2m,\
precipitation,windspeed_10m,hour,weekday,departure_hour,delay_class,is_weekend,\
is_rush_hour,precipitation_binary,temp_category";

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid timestamp")
    }

    fn test_config(dir: &Path) -> PipelineConfig {
        let mut conf = PipelineConfig::load(None).expect("should not fail");
        conf.input.path = dir.join("trains.parquet");
        conf.weather.source = WeatherSource::File {
            path: dir.join("weather.json"),
        };
        conf.output.merged_csv = dir.join("output").join("kombined_data.csv");
        conf.forest.n_trees = 10;
        conf
    }

    /// delays grow with the hour of day so the forest has something to learn
    fn delay_for(i: usize, hour: u32) -> Option<f64> {
        if i % 17 == 3 {
            None
        } else {
            Some(f64::from(hour / 4) * 4.0 + (i % 3) as f64)
        }
    }

    fn synthetic_features(n: usize) -> Vec<FeatureRecord> {
        (0..n)
            .map(|i| {
                let time = start() + Duration::minutes(37 * i as i64);
                let hour = time.hour();
                let weekday = time.weekday().num_days_from_monday();
                let is_canceled = i % 19 == 0;
                let delay_in_min = if is_canceled {
                    Some(-1.0)
                } else {
                    delay_for(i, hour)
                };
                let temperature_2m = (i % 25) as f64 - 5.0;
                let precipitation = if i % 4 == 0 { 0.3 } else { 0.0 };
                FeatureRecord {
                    station: String::from("München Hbf"),
                    final_destination_station: Some(
                        ["Hamburg-Altona", "Salzburg Hbf", "Nürnberg Hbf"][i % 3].to_string(),
                    ),
                    delay_in_min,
                    time: hour,
                    is_canceled,
                    train_type: Some(["ICE", "RE", "S"][i % 3].to_string()),
                    train_line_station_num: (i % 5) as i64,
                    departure_planned_time: hour,
                    temperature_2m: Some(temperature_2m),
                    precipitation: Some(precipitation),
                    windspeed_10m: Some((i % 11) as f64 * 1.5),
                    hour,
                    weekday,
                    departure_hour: hour,
                    delay_class: DelayClass::from_minutes(delay_in_min.unwrap_or(f64::NAN)),
                    is_weekend: is_weekend(weekday),
                    is_rush_hour: is_rush_hour(hour),
                    precipitation_binary: precipitation > 0.0,
                    temp_category: Some(TempCategory::from_celsius(temperature_2m)),
                }
            })
            .collect()
    }

    #[test]
    fn test_train_and_evaluate() {
        let dir = tempfile::tempdir().expect("should not fail");
        let conf = test_config(dir.path());
        let features = synthetic_features(150);
        let evaluation = train_and_evaluate(&features, &conf).expect("should not fail");

        assert_eq!(evaluation.n_test, 30);
        assert_eq!(evaluation.n_train, 120);
        assert_eq!(evaluation.confusion_matrix.total(), 30);
        assert_eq!(evaluation.report.weighted_avg.support, 30);
        assert!((0.0..=1.0).contains(&evaluation.report.accuracy));
        assert_eq!(evaluation.top_features.len(), 10);
        for pair in evaluation.top_features.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }

        let printed = evaluation.to_string();
        assert!(printed.starts_with("Confusion Matrix:\n[["));
        assert!(printed.contains("Classification Report:"));
        assert!(printed.contains("weighted avg"));
        assert!(printed.contains("Top 10 Feature Importances:"));
    }

    #[test]
    fn test_rows_without_weather_are_not_trained_on() {
        let dir = tempfile::tempdir().expect("should not fail");
        let conf = test_config(dir.path());
        let mut features = synthetic_features(100);
        for record in features.iter_mut().take(50) {
            record.temperature_2m = None;
            record.temp_category = None;
        }
        let evaluation = train_and_evaluate(&features, &conf).expect("should not fail");
        assert_eq!(evaluation.n_train + evaluation.n_test, 50);
        assert_eq!(evaluation.n_test, 10);

        for record in features.iter_mut() {
            record.windspeed_10m = None;
        }
        assert!(matches!(
            train_and_evaluate(&features, &conf),
            Err(AppError::EmptyDatasetError(100))
        ));
    }

    fn write_trains(path: &Path, n: usize) {
        let times: Vec<NaiveDateTime> = (0..n)
            .map(|i| start() + Duration::minutes(47 * (i / 2) as i64 + 5))
            .collect();
        let stations: Vec<&str> = (0..n)
            .map(|i| if i % 2 == 0 { "München Hbf" } else { "Augsburg Hbf" })
            .collect();
        let destinations: Vec<Option<&str>> = (0..n)
            .map(|i| match i % 10 {
                4 => None,
                _ => Some(["Hamburg-Altona", "Salzburg Hbf", "Lindau-Reutin"][i % 3]),
            })
            .collect();
        let delays: Vec<Option<f64>> = (0..n).map(|i| delay_for(i, times[i].hour())).collect();
        let canceled: Vec<bool> = (0..n).map(|i| i % 13 == 0).collect();
        let train_types: Vec<Option<&str>> = (0..n)
            .map(|i| match i % 14 {
                6 => None,
                _ => Some(["ICE", "RE", "RB", "S"][i % 4]),
            })
            .collect();
        let line_nums: Vec<i64> = (0..n).map(|i| (i % 6) as i64).collect();
        let micros = |ts: &[NaiveDateTime]| -> Vec<i64> {
            ts.iter().map(|t| t.and_utc().timestamp_micros()).collect()
        };
        let departures: Vec<NaiveDateTime> =
            times.iter().map(|t| *t - Duration::minutes(5)).collect();

        let schema = Arc::new(Schema::new(vec![
            Field::new("station", DataType::Utf8, false),
            Field::new("final_destination_station", DataType::Utf8, true),
            Field::new("delay_in_min", DataType::Float64, true),
            Field::new("time", DataType::Timestamp(TimeUnit::Microsecond, None), false),
            Field::new("is_canceled", DataType::Boolean, false),
            Field::new("train_type", DataType::Utf8, true),
            Field::new("train_line_station_num", DataType::Int64, false),
            Field::new(
                "departure_planned_time",
                DataType::Timestamp(TimeUnit::Microsecond, None),
                false,
            ),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(stations)),
            Arc::new(StringArray::from(destinations)),
            Arc::new(Float64Array::from(delays)),
            Arc::new(TimestampMicrosecondArray::from(micros(&times))),
            Arc::new(BooleanArray::from(canceled)),
            Arc::new(StringArray::from(train_types)),
            Arc::new(Int64Array::from(line_nums)),
            Arc::new(TimestampMicrosecondArray::from(micros(&departures))),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).expect("should not fail");
        let file = File::create(path).expect("should not fail");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("should not fail");
        writer.write(&batch).expect("should not fail");
        writer.close().expect("should not fail");
    }

    fn write_weather(path: &Path, hours: usize) {
        let times: Vec<String> = (0..hours)
            .map(|h| {
                (start() + Duration::hours(h as i64))
                    .format("%Y-%m-%dT%H:%M")
                    .to_string()
            })
            .collect();
        let temperature: Vec<f64> = (0..hours).map(|h| (h % 24) as f64 - 4.0).collect();
        let precipitation: Vec<f64> = (0..hours).map(|h| if h % 5 == 0 { 0.4 } else { 0.0 }).collect();
        let wind: Vec<f64> = (0..hours).map(|h| 3.0 + (h % 7) as f64).collect();
        let body = serde_json::json!({
            "latitude": 48.14,
            "longitude": 11.58,
            "timezone": "Europe/Berlin",
            "hourly": {
                "time": times,
                "temperature_2m": temperature,
                "precipitation": precipitation,
                "windspeed_10m": wind,
            }
        });
        std::fs::write(path, body.to_string()).expect("should not fail");
    }

    #[test]
    fn test_run_offline() {
        let dir = tempfile::tempdir().expect("should not fail");
        let conf = test_config(dir.path());
        write_trains(&conf.input.path, 120);
        write_weather(dir.path().join("weather.json").as_path(), 72);

        let evaluation = run(&conf).expect("should not fail");
        // 60 rows of the configured station, 12 of them held out
        assert_eq!(evaluation.n_train, 48);
        assert_eq!(evaluation.n_test, 12);
        assert_eq!(evaluation.confusion_matrix.total(), 12);

        let written = std::fs::read_to_string(&conf.output.merged_csv).expect("should not fail");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], MERGED_CSV_HEADER);
        assert_eq!(lines.len(), 61);
        assert!(lines[1..].iter().all(|l| l.starts_with("München Hbf,")));

        // row 4 has no destination, row 20 is running without a delay
        assert!(lines[3].starts_with("München Hbf,,"));
        let fields: Vec<&str> = lines[11].split(',').collect();
        assert_eq!(fields[1], "Lindau-Reutin");
        assert_eq!(fields[2], "");
        assert_eq!(fields[4], "false");
        assert_eq!(fields[14], "3");
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().expect("should not fail");
        let conf = test_config(dir.path());
        write_weather(dir.path().join("weather.json").as_path(), 24);
        assert!(matches!(
            run(&conf),
            Err(AppError::CollectionError { .. })
        ));
    }
}
