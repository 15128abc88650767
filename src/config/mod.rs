//! Configuration for the wage dashboard.

use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};

/// Location and text encoding of one source table
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Path to the delimited file
    pub path: PathBuf,
    /// Text encoding of the file
    pub encoding: &'static Encoding,
}

impl SourceConfig {
    /// Create a source config
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, encoding: &'static Encoding) -> Self {
        Self {
            path: path.into(),
            encoding,
        }
    }
}

/// Configuration for the dashboard
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// National wages across all industries
    pub national: SourceConfig,
    /// National wages by industry major category
    pub national_by_category: SourceConfig,
    /// Prefecture wages across all industries
    pub prefecture: SourceConfig,
    /// Prefecture capital coordinates
    pub geo_lookup: SourceConfig,
    /// Aggregation year shown on the heat map
    pub heat_map_year: i64,
    /// Rows per batch when parsing CSV
    pub batch_size: usize,
    /// Show a progress bar while loading
    pub show_progress: bool,
}

/// Directory holding the wage CSV files, relative to the data root
pub const CSV_DIR: &str = "csv_data";

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::with_data_dir(Path::new("."))
    }
}

impl DashboardConfig {
    /// Build the default source layout rooted at `dir`
    #[must_use]
    pub fn with_data_dir(dir: &Path) -> Self {
        let csv_dir = dir.join(CSV_DIR);
        Self {
            national: SourceConfig::new(
                csv_dir.join("雇用_医療福祉_一人当たり賃金_全国_全産業.csv"),
                SHIFT_JIS,
            ),
            national_by_category: SourceConfig::new(
                csv_dir.join("雇用_医療福祉_一人当たり賃金_全国_大分類.csv"),
                SHIFT_JIS,
            ),
            prefecture: SourceConfig::new(
                csv_dir.join("雇用_医療福祉_一人当たり賃金_都道府県_全産業.csv"),
                SHIFT_JIS,
            ),
            geo_lookup: SourceConfig::new(dir.join("pref_lat_lon.csv"), UTF_8),
            heat_map_year: 2019,
            batch_size: 8192,
            show_progress: true,
        }
    }
}
