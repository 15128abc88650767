//! Utility modules shared across the pipeline
//!
//! - `arrow`: typed column access and casting
//! - `logging`: log helpers, console formatting and progress bars
//! - `test`: synthetic table fixtures

pub mod arrow;
pub mod logging;
