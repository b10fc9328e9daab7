use arrow::{
    array::{Array, BooleanArray, RecordBatch, StringArray},
    compute::cast,
    datatypes::DataType,
    error::ArrowError,
};
use parquet::arrow::{arrow_reader::ArrowPredicate, ProjectionMask};

/// tests if a row was recorded at the target station. rows with a null
/// station never match.
pub struct StationRowPredicate {
    station: String,
    projection_mask: ProjectionMask,
}

impl StationRowPredicate {
    pub fn new(station: String, projection_mask: ProjectionMask) -> Self {
        Self {
            station,
            projection_mask,
        }
    }
}

impl ArrowPredicate for StationRowPredicate {
    fn projection(&self) -> &ProjectionMask {
        &self.projection_mask
    }

    fn evaluate(&mut self, batch: RecordBatch) -> Result<BooleanArray, ArrowError> {
        let column = batch
            .column_by_name("station")
            .ok_or(ArrowError::ParquetError(String::from(
                "`station` column not found",
            )))?;
        // dictionary or large string encodings are normalized to Utf8
        let casted = cast(column.as_ref(), &DataType::Utf8)?;
        let stations = casted
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or(ArrowError::ParquetError(String::from(
                "Cannot cast column `station` to StringArray type",
            )))?;

        let boolean_values: Vec<bool> = (0..stations.len())
            .map(|i| stations.is_valid(i) && stations.value(i) == self.station)
            .collect();
        Ok(BooleanArray::from(boolean_values))
    }
}
