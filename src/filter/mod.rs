//! Filtering capabilities for wage tables
//!
//! This module provides a small expression-based filtering system for Arrow
//! record batches, allowing rows to be kept or dropped by column value.

pub mod expr;

pub use expr::{ColumnBuilder, Expr, Literal, col, evaluate_expr, filter_record_batch};
