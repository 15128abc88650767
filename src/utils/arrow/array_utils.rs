//! Utilities for working with Arrow arrays.
//!
//! This module provides functions for safely extracting typed columns from
//! record batches, with type adaptation where the source data needs it.

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::compute::kernels::cast::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{DashboardError, Result};

/// Get a column from a record batch, cast to the expected data type
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The data type the caller needs
///
/// # Returns
///
/// * `Ok(ArrayRef)` - The column array, converted if necessary
/// * `Err(DashboardError)` - If the column is missing or the cast fails
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
) -> Result<ArrayRef> {
    let column = batch
        .column_by_name(column_name)
        .ok_or_else(|| DashboardError::column_not_found(column_name))?;

    let actual_type = column.data_type();
    if actual_type == expected_type {
        return Ok(column.clone());
    }

    debug!("Converting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    let converted = cast(column, expected_type)?;

    // A non-null value turning into null means the cast could not represent it
    if converted.null_count() > column.null_count() {
        return Err(DashboardError::invalid_data_type(
            column_name,
            &expected_type.to_string(),
        ));
    }

    Ok(converted)
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| DashboardError::invalid_data_type(column_name, expected_type_name))
}

fn named_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(column_name)
        .ok_or_else(|| DashboardError::column_not_found(column_name))
}

/// Borrow a Utf8 column by name
pub fn string_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a StringArray> {
    downcast_array(named_column(batch, column_name)?, column_name, "Utf8")
}

/// Borrow an Int64 column by name
pub fn int64_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Int64Array> {
    downcast_array(named_column(batch, column_name)?, column_name, "Int64")
}

/// Borrow a Float64 column by name
pub fn float64_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Float64Array> {
    downcast_array(named_column(batch, column_name)?, column_name, "Float64")
}
