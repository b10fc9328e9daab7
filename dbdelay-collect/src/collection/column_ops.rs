use super::CollectionError;
use arrow::{
    array::{Array, ArrayRef, BooleanArray, PrimitiveArray, RecordBatch, StringArray},
    compute::cast,
    datatypes::{ArrowPrimitiveType, DataType, TimestampMicrosecondType},
    error::ArrowError,
};
use chrono::NaiveDateTime;

/// gets a column by name and casts it to the expected arrow type, so that
/// equivalent encodings (Int32 vs Int64, dictionary strings, timestamp units)
/// are read the same way.
pub fn cast_column(
    batch: &RecordBatch,
    column: &str,
    target: &DataType,
) -> Result<ArrayRef, CollectionError> {
    let array = batch
        .column_by_name(column)
        .ok_or_else(|| CollectionError::MissingColumnError(column.to_string()))?;
    cast(array.as_ref(), target).map_err(|e| CollectionError::ColumnCastError {
        column: column.to_string(),
        target: target.to_string(),
        source: e,
    })
}

/// helper function to view a casted column as the expected array type.
pub fn downcast<'a, T>(array: &'a ArrayRef, column: &str) -> Result<&'a T, CollectionError>
where
    T: 'static,
{
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| CollectionError::ColumnCastError {
            column: column.to_string(),
            target: std::any::type_name::<T>().to_string(),
            source: ArrowError::CastError(format!("unexpected array type {}", array.data_type())),
        })
}

pub fn string_value(
    array: &StringArray,
    column: &str,
    row: usize,
) -> Result<String, CollectionError> {
    if array.is_null(row) {
        Err(null_value(column, row))
    } else {
        Ok(array.value(row).to_string())
    }
}

pub fn optional_string(array: &StringArray, row: usize) -> Option<String> {
    if array.is_null(row) {
        None
    } else {
        Some(array.value(row).to_string())
    }
}

pub fn bool_value(array: &BooleanArray, column: &str, row: usize) -> Result<bool, CollectionError> {
    if array.is_null(row) {
        Err(null_value(column, row))
    } else {
        Ok(array.value(row))
    }
}

pub fn primitive_value<T>(
    array: &PrimitiveArray<T>,
    column: &str,
    row: usize,
) -> Result<T::Native, CollectionError>
where
    T: ArrowPrimitiveType,
{
    optional_value(array, row).ok_or_else(|| null_value(column, row))
}

pub fn optional_value<T>(array: &PrimitiveArray<T>, row: usize) -> Option<T::Native>
where
    T: ArrowPrimitiveType,
{
    if array.is_null(row) {
        None
    } else {
        Some(array.value(row))
    }
}

pub fn datetime_value(
    array: &PrimitiveArray<TimestampMicrosecondType>,
    column: &str,
    row: usize,
) -> Result<NaiveDateTime, CollectionError> {
    if array.is_null(row) {
        return Err(null_value(column, row));
    }
    array
        .value_as_datetime(row)
        .ok_or_else(|| CollectionError::TimestampRangeError {
            column: column.to_string(),
            row,
        })
}

fn null_value(column: &str, row: usize) -> CollectionError {
    CollectionError::NullValueError {
        column: column.to_string(),
        row,
    }
}
