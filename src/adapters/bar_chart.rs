//! Animated horizontal bar chart of wages by industry

use arrow::record_batch::RecordBatch;
use serde::Serialize;

use super::ViewAdapter;
use crate::error::Result;
use crate::models::{BatchRecord, CategoryWageRecord, WageMetric};
use crate::transform::max_value;

/// Headroom added past the largest bar
pub const RANGE_PADDING: f64 = 20.0;
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 500;
/// Bars run horizontally
pub const ORIENTATION: &str = "h";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    /// Selected wage metric
    pub value: f64,
    /// Industry major category
    pub category: String,
    /// Industry major category
    pub color: String,
    /// Age bracket; one animation frame per bracket
    pub animation_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartView {
    pub metric: WageMetric,
    pub bars: Vec<Bar>,
    pub range_x: [f64; 2],
    pub orientation: &'static str,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct BarChartAdapter {
    pub metric: WageMetric,
}

impl BarChartAdapter {
    #[must_use]
    pub const fn new(metric: WageMetric) -> Self {
        Self { metric }
    }
}

impl ViewAdapter for BarChartAdapter {
    type View = BarChartView;

    /// The x axis spans `[0, max + 20]` of the selected metric, or `[0, 20]`
    /// for an empty table. Rows without a value for the metric get no bar.
    fn adapt(&self, table: &RecordBatch) -> Result<BarChartView> {
        let upper = max_value(table, self.metric.column())?.unwrap_or(0.0) + RANGE_PADDING;

        let bars = CategoryWageRecord::from_batch(table)?
            .into_iter()
            .filter_map(|record| {
                Some(Bar {
                    value: record.metric(self.metric)?,
                    category: record.industry_category.clone(),
                    color: record.industry_category,
                    animation_key: record.age,
                })
            })
            .collect();

        Ok(BarChartView {
            metric: self.metric,
            bars,
            range_x: [0.0, upper],
            orientation: ORIENTATION,
            width: WIDTH,
            height: HEIGHT,
        })
    }
}
