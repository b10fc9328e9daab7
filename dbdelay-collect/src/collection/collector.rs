use arrow::{
    array::{BooleanArray, Float64Array, Int64Array, PrimitiveArray, RecordBatch, StringArray},
    datatypes::{DataType, TimeUnit, TimestampMicrosecondType},
};
use dbdelay_core::model::{TrainRecord, TRAIN_RECORD_COLUMNS};
use parquet::arrow::{
    arrow_reader::{ArrowPredicate, ParquetRecordBatchReaderBuilder, RowFilter},
    ProjectionMask,
};
use std::{fs::File, path::Path, time::Instant};

use super::column_ops::{
    bool_value, cast_column, datetime_value, downcast, optional_string, optional_value,
    primitive_value, string_value,
};
use super::{CollectionError, StationRowPredicate};

/// timestamps are read as naive local wall-clock time at microsecond precision.
const NAIVE_TIMESTAMP: DataType = DataType::Timestamp(TimeUnit::Microsecond, None);

/// reads train records from a parquet file, keeping only the columns of a
/// [`TrainRecord`] and optionally the rows of a single station.
#[derive(Debug, Clone)]
pub struct TrainRecordCollector {
    batch_size: usize,
}

impl TrainRecordCollector {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    /// loads all records from the parquet file at `path`. when `station` is
    /// provided, rows are filtered while decoding. fails if the file is
    /// absent, a required column is missing, or a required value is null.
    /// destination, train type and delay may be null.
    pub fn collect_from_path(
        &self,
        path: &Path,
        station: Option<&str>,
    ) -> Result<Vec<TrainRecord>, CollectionError> {
        let start = Instant::now();
        let file = File::open(path).map_err(|e| CollectionError::FileOpenError {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)
            .map_err(|e| CollectionError::ArrowReaderError { source: e })?;

        for column in TRAIN_RECORD_COLUMNS {
            builder
                .schema()
                .field_with_name(column)
                .map_err(|_| CollectionError::MissingColumnError(column.to_string()))?;
        }
        log::debug!(
            "reading {} rows in {} row groups from {}",
            builder.metadata().file_metadata().num_rows(),
            builder.metadata().num_row_groups(),
            path.to_string_lossy()
        );

        let projection = ProjectionMask::columns(builder.parquet_schema(), TRAIN_RECORD_COLUMNS);
        let row_filter = station.map(|s| {
            let mask = ProjectionMask::columns(builder.parquet_schema(), ["station"]);
            let predicate: Box<dyn ArrowPredicate> =
                Box::new(StationRowPredicate::new(s.to_string(), mask));
            RowFilter::new(vec![predicate])
        });

        let mut builder = builder
            .with_projection(projection)
            .with_batch_size(self.batch_size);
        if let Some(row_filter) = row_filter {
            builder = builder.with_row_filter(row_filter);
        }
        let reader = builder
            .build()
            .map_err(|e| CollectionError::ArrowReaderError { source: e })?;

        let mut records = Vec::new();
        for batch in reader {
            let batch =
                batch.map_err(|e| CollectionError::RecordBatchRetrievalError { source: e })?;
            log::debug!("decoding batch with {} rows", batch.num_rows());
            records.extend(read_batch(&batch)?);
        }

        match station {
            Some(s) => log::info!("collected {} train records for '{s}'", records.len()),
            None => log::info!("collected {} train records", records.len()),
        }
        log::info!("train record collection time {:?}", start.elapsed());
        Ok(records)
    }
}

/// deserializes a record batch into native records.
fn read_batch(batch: &RecordBatch) -> Result<Vec<TrainRecord>, CollectionError> {
    let stations = cast_column(batch, "station", &DataType::Utf8)?;
    let destinations = cast_column(batch, "final_destination_station", &DataType::Utf8)?;
    let delays = cast_column(batch, "delay_in_min", &DataType::Float64)?;
    let times = cast_column(batch, "time", &NAIVE_TIMESTAMP)?;
    let canceled = cast_column(batch, "is_canceled", &DataType::Boolean)?;
    let train_types = cast_column(batch, "train_type", &DataType::Utf8)?;
    let line_nums = cast_column(batch, "train_line_station_num", &DataType::Int64)?;
    let departures = cast_column(batch, "departure_planned_time", &NAIVE_TIMESTAMP)?;

    let stations = downcast::<StringArray>(&stations, "station")?;
    let destinations = downcast::<StringArray>(&destinations, "final_destination_station")?;
    let delays = downcast::<Float64Array>(&delays, "delay_in_min")?;
    let times = downcast::<PrimitiveArray<TimestampMicrosecondType>>(&times, "time")?;
    let canceled = downcast::<BooleanArray>(&canceled, "is_canceled")?;
    let train_types = downcast::<StringArray>(&train_types, "train_type")?;
    let line_nums = downcast::<Int64Array>(&line_nums, "train_line_station_num")?;
    let departures =
        downcast::<PrimitiveArray<TimestampMicrosecondType>>(&departures, "departure_planned_time")?;

    (0..batch.num_rows())
        .map(|row| {
            Ok(TrainRecord {
                station: string_value(stations, "station", row)?,
                final_destination_station: optional_string(destinations, row),
                delay_in_min: optional_value(delays, row),
                time: datetime_value(times, "time", row)?,
                is_canceled: bool_value(canceled, "is_canceled", row)?,
                train_type: optional_string(train_types, row),
                train_line_station_num: primitive_value(line_nums, "train_line_station_num", row)?,
                departure_planned_time: datetime_value(departures, "departure_planned_time", row)?,
            })
        })
        .collect()
}
