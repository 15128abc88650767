//! National vs. prefecture wage over time

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use super::ViewAdapter;
use crate::error::Result;
use crate::models::BatchRecord;
use crate::schema::YEAR;

/// One year of the two wage series
///
/// A missing wage is kept as `None` and leaves a gap in its line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    #[serde(rename = "集計年")]
    pub year: i64,
    #[serde(rename = "全国平均賃金")]
    pub national_mean: Option<f64>,
    #[serde(rename = "平均賃金")]
    pub prefecture_mean: Option<f64>,
}

impl BatchRecord for LinePoint {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartView {
    /// Column used as the x axis
    pub index_key: &'static str,
    pub rows: Vec<LinePoint>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineChartAdapter;

impl ViewAdapter for LineChartAdapter {
    type View = LineChartView;

    fn adapt(&self, table: &RecordBatch) -> Result<LineChartView> {
        let mut rows = LinePoint::from_batch(table)?;
        rows.sort_by_key(|row| row.year);
        Ok(LineChartView {
            index_key: YEAR,
            rows,
        })
    }
}
