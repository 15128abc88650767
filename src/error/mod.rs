//! Error handling for the wage dashboard.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;

/// Specialized error type for the dashboard pipeline
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// A source table could not be loaded. Always fatal.
    #[error("Failed to load {source_name} from {}: {reason}", path.display())]
    Load {
        source_name: String,
        path: PathBuf,
        reason: String,
    },

    /// A column required by an operation is missing
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column has a different Arrow type than expected
    #[error("Column '{column}' is not a {expected} array")]
    InvalidDataType { column: String, expected: String },

    /// A rename would produce two columns with the same name
    #[error("Column '{column}' already exists")]
    DuplicateColumn { column: String },

    /// Min-max normalization over a column whose values are all equal
    #[error("Cannot normalize '{column}': every value equals {value}")]
    DegenerateRange { column: String, value: f64 },

    /// Arrow compute or IO error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Failed to convert a batch into row models
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// Failed to serialize chart parameters
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing presenter output
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DashboardError {
    /// Create a load error for the named source
    pub fn load(source_name: &str, path: &Path, reason: impl Into<String>) -> Self {
        Self::Load {
            source_name: source_name.to_string(),
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a column-not-found error
    pub fn column_not_found(column: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
        }
    }

    /// Create a data type mismatch error
    pub fn invalid_data_type(column: &str, expected: &str) -> Self {
        Self::InvalidDataType {
            column: column.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Whether this error happened while loading sources
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(self, Self::Load { .. })
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
