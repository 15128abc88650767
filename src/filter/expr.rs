//! Composable row filter expressions over Arrow `RecordBatch`es
//!
//! Expressions evaluate to a boolean mask that is then applied to every column
//! of the batch. Rows where the mask is null are dropped.

use arrow::array::{Array, BooleanArray, Int64Array, StringArray};
use arrow::compute::kernels::cmp::eq;
use arrow::compute::not;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{DashboardError, Result};

/// A literal compared against a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Int(i64),
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Column equals literal
    Eq { column: String, value: Literal },
    Not(Box<Expr>),
}

impl Expr {
    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}

#[must_use]
pub fn col(name: &str) -> ColumnBuilder {
    ColumnBuilder {
        name: name.to_string(),
    }
}

pub struct ColumnBuilder {
    name: String,
}

impl ColumnBuilder {
    pub fn eq(self, val: impl Into<Literal>) -> Expr {
        Expr::Eq {
            column: self.name,
            value: val.into(),
        }
    }
}

pub fn evaluate_expr(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray> {
    match expr {
        Expr::Eq { column, value } => eq_mask(batch, column, value),
        Expr::Not(inner) => Ok(not(&evaluate_expr(batch, inner)?)?),
    }
}

fn eq_mask(batch: &RecordBatch, column: &str, value: &Literal) -> Result<BooleanArray> {
    let array = batch
        .column_by_name(column)
        .ok_or_else(|| DashboardError::column_not_found(column))?;

    let mask = match (value, array.data_type()) {
        (Literal::Str(val), DataType::Utf8) => eq(array, &StringArray::new_scalar(val.as_str()))?,
        (Literal::Int(v), DataType::Int64) => eq(array, &Int64Array::new_scalar(*v))?,
        (Literal::Str(_), _) => return Err(DashboardError::invalid_data_type(column, "Utf8")),
        (Literal::Int(_), _) => return Err(DashboardError::invalid_data_type(column, "Int64")),
    };
    Ok(mask)
}

/// Keep only the rows of `batch` matching `expr`
pub fn filter_record_batch(batch: &RecordBatch, expr: &Expr) -> Result<RecordBatch> {
    let mask = evaluate_expr(batch, expr)?;
    if mask.len() != batch.num_rows() {
        return Err(DashboardError::Arrow(arrow::error::ArrowError::ComputeError(
            format!(
                "Mask length ({}) doesn't match batch row count ({})",
                mask.len(),
                batch.num_rows()
            ),
        )));
    }
    Ok(arrow::compute::filter_record_batch(batch, &mask)?)
}
