//! Utility functions for error handling
//!
//! This module provides file access helpers that turn IO failures into
//! descriptive load errors.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{DashboardError, Result};

/// Safely open a source file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `source_name` - Which source the file holds (for error context)
///
/// # Returns
/// * `Result<fs::File>` - The opened file or a load error
pub fn safe_open_file(path: &Path, source_name: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(DashboardError::load(source_name, path, "File not found"));
    }

    if !path.is_file() {
        return Err(DashboardError::load(source_name, path, "Path is not a file"));
    }

    fs::File::open(path).map_err(|e| {
        let reason = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            io::ErrorKind::NotFound => {
                "File not found - it may have been deleted during operation".to_string()
            }
            _ => format!("Failed to open file: {e}"),
        };
        DashboardError::load(source_name, path, reason)
    })
}

/// Safely read a whole source file into memory
pub fn safe_read_bytes(path: &Path, source_name: &str) -> Result<Vec<u8>> {
    let mut file = safe_open_file(path, source_name)?;

    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| DashboardError::load(source_name, path, format!("Failed to read file: {e}")))?;

    Ok(content)
}
