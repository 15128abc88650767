//! A Rust library for loading Japanese wage statistics and deriving the
//! tables and chart parameters of an interactive wage dashboard.

pub mod adapters;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod selection;
pub mod shell;
pub mod transform;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{DashboardConfig, SourceConfig};
pub use dashboard::{Dashboard, ViewTables};
pub use error::{DashboardError, Result};
pub use loader::{RawTables, load_datasets};
pub use models::WageMetric;
pub use selection::{SelectionChange, SelectionOptions, SelectionState, ViewKind};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Presentation
pub use adapters::ViewAdapter;
pub use shell::{ConsolePresenter, Presenter};
