//! Table-to-chart adapters
//!
//! Each adapter is a pure projection of one derived view-table into the
//! parameter shape its chart widget expects. Adapters never modify the table
//! they read.

use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::error::Result;

pub mod bar_chart;
pub mod bubble_chart;
pub mod heat_map;
pub mod line_chart;

pub use bar_chart::{Bar, BarChartAdapter, BarChartView};
pub use bubble_chart::{BubbleChartAdapter, BubbleChartView, BubblePoint};
pub use heat_map::{HeatMapAdapter, HeatMapParams, HeatMapView, HeatPoint};
pub use line_chart::{LineChartAdapter, LineChartView, LinePoint};

/// Projection of a view-table into chart parameters
pub trait ViewAdapter {
    /// Parameters handed to the chart widget
    type View: Serialize;

    /// Build chart parameters from `table`
    fn adapt(&self, table: &RecordBatch) -> Result<Self::View>;
}
