//! Console output utilities
//!
//! This module provides text formatting for tables shown on a console.

use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::Result;

/// Render a table as an ASCII grid
pub fn format_table(batch: &RecordBatch) -> Result<String> {
    Ok(pretty_format_batches(std::slice::from_ref(batch))?.to_string())
}

/// One-line summary of a table's shape and columns
#[must_use]
pub fn table_summary(batch: &RecordBatch) -> String {
    let columns = batch
        .schema()
        .fields()
        .iter()
        .map(|field| format!("{} ({})", field.name(), field.data_type()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} rows: {columns}", batch.num_rows())
}
