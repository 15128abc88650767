//! Heat map over prefecture capitals

use arrow::record_batch::RecordBatch;
use serde::Serialize;

use super::ViewAdapter;
use crate::error::Result;
use crate::schema::{LATITUDE, LONGITUDE, RELATIVE_WAGE};
use crate::utils::arrow::float64_column;

/// One weighted point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub weight: f64,
}

/// Camera and layer settings for the heat map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatMapParams {
    pub center_longitude: f64,
    pub center_latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub opacity: f64,
    pub threshold: f64,
}

impl Default for HeatMapParams {
    // Centered on Tokyo
    fn default() -> Self {
        Self {
            center_longitude: 139.691648,
            center_latitude: 35.689185,
            zoom: 4.0,
            pitch: 40.5,
            opacity: 0.4,
            threshold: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatMapView {
    pub points: Vec<HeatPoint>,
    pub params: HeatMapParams,
}

#[derive(Debug, Clone, Default)]
pub struct HeatMapAdapter {
    pub params: HeatMapParams,
}

impl ViewAdapter for HeatMapAdapter {
    type View = HeatMapView;

    /// Rows missing a coordinate or weight are left off the map.
    fn adapt(&self, table: &RecordBatch) -> Result<HeatMapView> {
        let longitudes = float64_column(table, LONGITUDE)?;
        let latitudes = float64_column(table, LATITUDE)?;
        let weights = float64_column(table, RELATIVE_WAGE)?;

        let points = longitudes
            .iter()
            .zip(latitudes.iter())
            .zip(weights.iter())
            .filter_map(|((lon, lat), weight)| {
                Some(HeatPoint {
                    longitude: lon?,
                    latitude: lat?,
                    weight: weight?,
                })
            })
            .collect();

        Ok(HeatMapView {
            points,
            params: self.params,
        })
    }
}
