//! Side-effect-free table transforms
//!
//! Every operation borrows its input batch and returns a new `RecordBatch`.
//! Column data is shared between input and output through Arrow's reference
//! counted buffers, so no input is ever mutated.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::{DashboardError, Result};
use crate::filter::{col, filter_record_batch};
use crate::schema::{AGE, ALL_AGES, PREFECTURE, YEAR};
use crate::utils::arrow::{downcast_array, get_column, int64_column, string_column};
use crate::utils::logging::log_warning;

/// Suffix given to a left-side column whose name also appears on the right
pub const LEFT_SUFFIX: &str = "_x";
/// Suffix given to a right-side column whose name also appears on the left
pub const RIGHT_SUFFIX: &str = "_y";

/// Keep rows whose age bracket is the all-ages aggregate
pub fn filter_by_age_all(table: &RecordBatch) -> Result<RecordBatch> {
    filter_record_batch(table, &col(AGE).eq(ALL_AGES))
}

/// Keep rows for individual age brackets, dropping the all-ages aggregate
pub fn filter_by_age_not_all(table: &RecordBatch) -> Result<RecordBatch> {
    filter_record_batch(table, &col(AGE).eq(ALL_AGES).not())
}

/// Keep rows for one aggregation year
pub fn filter_by_year(table: &RecordBatch, year: i64) -> Result<RecordBatch> {
    filter_record_batch(table, &col(YEAR).eq(year))
}

/// Keep rows for one prefecture
pub fn filter_by_prefecture(table: &RecordBatch, name: &str) -> Result<RecordBatch> {
    filter_record_batch(table, &col(PREFECTURE).eq(name))
}

/// Rename a column without touching its data
pub fn rename_column(table: &RecordBatch, old: &str, new: &str) -> Result<RecordBatch> {
    let schema = table.schema();
    let idx = schema
        .index_of(old)
        .map_err(|_| DashboardError::column_not_found(old))?;
    if old != new && schema.column_with_name(new).is_some() {
        return Err(DashboardError::DuplicateColumn {
            column: new.to_string(),
        });
    }

    let fields: Vec<FieldRef> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            if i == idx {
                Arc::new(Field::clone(field).with_name(new))
            } else {
                Arc::clone(field)
            }
        })
        .collect();
    let renamed = Schema::new_with_metadata(fields, schema.metadata().clone());

    Ok(RecordBatch::try_new(
        Arc::new(renamed),
        table.columns().to_vec(),
    )?)
}

/// Project a table onto the named columns, in the given order
pub fn select_columns(table: &RecordBatch, names: &[&str]) -> Result<RecordBatch> {
    let schema = table.schema();
    let indices = names
        .iter()
        .map(|name| {
            schema
                .index_of(name)
                .map_err(|_| DashboardError::column_not_found(name))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(table.project(&indices)?)
}

/// Row position as a `take` index
fn row_index(row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| {
        DashboardError::Arrow(ArrowError::ComputeError(format!(
            "Row {row} exceeds the u32 index range"
        )))
    })
}

fn take_rows(table: &RecordBatch, indices: &UInt32Array) -> Result<Vec<ArrayRef>> {
    table
        .columns()
        .iter()
        .map(|column| take(column.as_ref(), indices, None).map_err(DashboardError::from))
        .collect()
}

/// Stable ascending sort on a Utf8 or Int64 column, nulls last
pub fn sort_by(table: &RecordBatch, column: &str) -> Result<RecordBatch> {
    let keys = key_values(table, column)?;
    // `sorted_by` is stable, so rows with equal keys keep their relative order
    let order = (0..table.num_rows())
        .sorted_by(|&a, &b| match (&keys[a], &keys[b]) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        })
        .map(row_index)
        .collect::<Result<Vec<_>>>()?;

    let columns = take_rows(table, &UInt32Array::from(order))?;
    Ok(RecordBatch::try_new(table.schema(), columns)?)
}

/// A join or sort key borrowed from a Utf8 or Int64 column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum KeyValue<'a> {
    Str(&'a str),
    Int(i64),
}

fn key_values<'a>(table: &'a RecordBatch, column: &str) -> Result<Vec<Option<KeyValue<'a>>>> {
    let array = table
        .column_by_name(column)
        .ok_or_else(|| DashboardError::column_not_found(column))?;
    match array.data_type() {
        DataType::Utf8 => Ok(string_column(table, column)?
            .iter()
            .map(|v| v.map(KeyValue::Str))
            .collect()),
        DataType::Int64 => Ok(int64_column(table, column)?
            .iter()
            .map(|v| v.map(KeyValue::Int))
            .collect()),
        _ => Err(DashboardError::invalid_data_type(column, "Utf8 or Int64")),
    }
}

/// Inner join two tables on a column present in both
///
/// Output rows follow the left table's order; a left row matching several
/// right rows expands in right-table order. Output columns are every left
/// column followed by every right column except the key. Non-key names present
/// on both sides get `_x` (left) and `_y` (right) suffixes.
///
/// Rows without a partner on the other side are dropped. The drop is not an
/// error, but it is logged with the number of rows lost on each side.
pub fn join_on(left: &RecordBatch, right: &RecordBatch, key: &str) -> Result<RecordBatch> {
    let left_schema = left.schema();
    let right_schema = right.schema();
    let left_type = left_schema
        .field_with_name(key)
        .map_err(|_| DashboardError::column_not_found(key))?
        .data_type();
    let right_type = right_schema
        .field_with_name(key)
        .map_err(|_| DashboardError::column_not_found(key))?
        .data_type();
    if left_type != right_type {
        return Err(DashboardError::invalid_data_type(key, &left_type.to_string()));
    }

    let left_keys = key_values(left, key)?;
    let right_keys = key_values(right, key)?;

    let mut index: FxHashMap<&KeyValue<'_>, Vec<u32>> = FxHashMap::default();
    for (row, value) in right_keys.iter().enumerate() {
        if let Some(value) = value {
            index.entry(value).or_default().push(row_index(row)?);
        }
    }

    let mut left_rows = Vec::new();
    let mut right_rows = Vec::new();
    let mut right_matched = vec![false; right.num_rows()];
    let mut left_unmatched = 0usize;
    for (row, value) in left_keys.iter().enumerate() {
        match value.as_ref().and_then(|v| index.get(v)) {
            Some(partners) => {
                for &partner in partners {
                    left_rows.push(row_index(row)?);
                    right_rows.push(partner);
                    right_matched[partner as usize] = true;
                }
            }
            None => left_unmatched += 1,
        }
    }
    let right_unmatched = right_matched.iter().filter(|m| !**m).count();

    if left_unmatched > 0 || right_unmatched > 0 {
        log_warning(
            &format!(
                "Join on '{key}' dropped {left_unmatched} of {} left rows and {right_unmatched} of {} right rows",
                left.num_rows(),
                right.num_rows()
            ),
            None,
        );
    }

    let left_names: HashSet<&str> = left_schema.fields().iter().map(|f| f.name().as_str()).collect();
    let right_names: HashSet<&str> = right_schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .filter(|name| *name != key)
        .collect();

    let mut fields: Vec<FieldRef> = Vec::new();
    for field in left_schema.fields() {
        if field.name() != key && right_names.contains(field.name().as_str()) {
            let name = format!("{}{LEFT_SUFFIX}", field.name());
            fields.push(Arc::new(Field::clone(field).with_name(name)));
        } else {
            fields.push(Arc::clone(field));
        }
    }
    let right_keep = right_schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, field)| field.name() != key)
        .collect_vec();
    for (_, field) in &right_keep {
        if left_names.contains(field.name().as_str()) {
            let name = format!("{}{RIGHT_SUFFIX}", field.name());
            fields.push(Arc::new(Field::clone(field).with_name(name)));
        } else {
            fields.push(Arc::clone(field));
        }
    }

    let left_indices = UInt32Array::from(left_rows);
    let right_indices = UInt32Array::from(right_rows);
    let mut columns = take_rows(left, &left_indices)?;
    for (idx, _) in right_keep {
        columns.push(take(right.column(idx).as_ref(), &right_indices, None)?);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Append a min-max normalized copy of `field` as the Float64 column `output`
///
/// Values are scaled to `(x - min) / (max - min)` over the table's current
/// rows, so the minimum maps to 0.0 and the maximum to 1.0. Nulls stay null.
/// A table without non-null values yields an all-null column.
///
/// # Errors
/// Returns `DegenerateRange` when every non-null value is equal, since the
/// scale is undefined.
pub fn normalize(table: &RecordBatch, field: &str, output: &str) -> Result<RecordBatch> {
    let schema = table.schema();
    if schema.column_with_name(output).is_some() {
        return Err(DashboardError::DuplicateColumn {
            column: output.to_string(),
        });
    }

    let column = get_column(table, field, &DataType::Float64)?;
    let values = downcast_array::<Float64Array>(&column, field, "Float64")?;

    let normalized: Float64Array = match (arrow::compute::min(values), arrow::compute::max(values)) {
        (Some(min), Some(max)) => {
            let range = max - min;
            if range == 0.0 {
                return Err(DashboardError::DegenerateRange {
                    column: field.to_string(),
                    value: min,
                });
            }
            values.iter().map(|v| v.map(|x| (x - min) / range)).collect()
        }
        _ => Float64Array::from(vec![None; table.num_rows()]),
    };

    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    fields.push(Arc::new(Field::new(output, DataType::Float64, true)));
    let mut columns = table.columns().to_vec();
    columns.push(Arc::new(normalized));

    Ok(RecordBatch::try_new(
        Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone())),
        columns,
    )?)
}

/// Values that can be read out of a table column for option lists
pub trait ColumnValue: Clone + Eq + Hash + Sized {
    fn column_values(table: &RecordBatch, field: &str) -> Result<Vec<Option<Self>>>;
}

impl ColumnValue for String {
    fn column_values(table: &RecordBatch, field: &str) -> Result<Vec<Option<Self>>> {
        Ok(string_column(table, field)?
            .iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }
}

impl ColumnValue for i64 {
    fn column_values(table: &RecordBatch, field: &str) -> Result<Vec<Option<Self>>> {
        Ok(int64_column(table, field)?.iter().collect())
    }
}

/// Distinct non-null values of a column in first-seen order
pub fn unique_values<T: ColumnValue>(table: &RecordBatch, field: &str) -> Result<Vec<T>> {
    Ok(T::column_values(table, field)?
        .into_iter()
        .flatten()
        .unique()
        .collect())
}

/// Largest non-null value of a numeric column, if any
pub fn max_value(table: &RecordBatch, field: &str) -> Result<Option<f64>> {
    let column = get_column(table, field, &DataType::Float64)?;
    let values = downcast_array::<Float64Array>(&column, field, "Float64")?;
    Ok(arrow::compute::max(values))
}
