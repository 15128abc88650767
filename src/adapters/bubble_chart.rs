//! Animated bubble chart of national wages per age bracket

use arrow::record_batch::RecordBatch;
use serde::Serialize;

use super::ViewAdapter;
use crate::error::Result;
use crate::models::{BatchRecord, WageRecord};

pub const RANGE_X: [f64; 2] = [150.0, 700.0];
pub const RANGE_Y: [f64; 2] = [0.0, 150.0];
pub const SIZE_MAX: f64 = 38.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubblePoint {
    /// Per-capita wage
    pub x: f64,
    /// Annual bonus
    pub y: f64,
    /// Scheduled salary
    pub size: f64,
    /// Age bracket
    pub color: String,
    /// Aggregation year; one animation frame per year
    pub animation_key: i64,
    /// Age bracket; ties a bubble across frames
    pub animation_group: String,
}

impl BubblePoint {
    /// `None` when any of the three wages is missing
    fn from_record(record: WageRecord) -> Option<Self> {
        Some(Self {
            x: record.per_capita_wage?,
            y: record.annual_bonus?,
            size: record.scheduled_salary?,
            color: record.age.clone(),
            animation_key: record.year,
            animation_group: record.age,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleChartView {
    pub points: Vec<BubblePoint>,
    pub range_x: [f64; 2],
    pub range_y: [f64; 2],
    pub size_max: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleChartAdapter;

impl ViewAdapter for BubbleChartAdapter {
    type View = BubbleChartView;

    /// Rows missing a wage are left off the chart.
    fn adapt(&self, table: &RecordBatch) -> Result<BubbleChartView> {
        let points = WageRecord::from_batch(table)?
            .into_iter()
            .filter_map(BubblePoint::from_record)
            .collect();
        Ok(BubbleChartView {
            points,
            range_x: RANGE_X,
            range_y: RANGE_Y,
            size_max: SIZE_MAX,
        })
    }
}
