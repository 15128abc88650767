//! Arrow data handling utilities
//!
//! This module contains helpers for typed column access and type conversion
//! on record batches.

pub mod array_utils;

// Re-export commonly used functions for convenience
pub use array_utils::{downcast_array, float64_column, get_column, int64_column, string_column};
