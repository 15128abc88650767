//! Typed wage rows
//!
//! Rows are deserialized from record batches through `serde_arrow`, keyed by
//! the source column labels. Extra columns in a batch are ignored. Wage cells
//! may be empty in the sources, so every wage is optional.

use std::fmt;

use arrow::record_batch::RecordBatch;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::schema::{ANNUAL_BONUS, PER_CAPITA_WAGE, SCHEDULED_SALARY};

/// Conversion from a record batch into row models
pub trait BatchRecord: DeserializeOwned + Sized {
    /// Deserialize every row of `batch`
    fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        serde_arrow::from_record_batch::<Vec<Self>>(batch)
            .map_err(|e| DashboardError::Deserialize(e.to_string()))
    }
}

/// The wage figure a chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WageMetric {
    ScheduledSalary,
    Bonus,
    PerCapita,
}

impl WageMetric {
    /// Selectable metrics, in the order they are offered
    pub const ALL: [Self; 3] = [Self::ScheduledSalary, Self::Bonus, Self::PerCapita];

    /// Column holding this metric
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::ScheduledSalary => SCHEDULED_SALARY,
            Self::Bonus => ANNUAL_BONUS,
            Self::PerCapita => PER_CAPITA_WAGE,
        }
    }
}

impl fmt::Display for WageMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// National wages for one age bracket and year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageRecord {
    #[serde(rename = "年齢")]
    pub age: String,
    #[serde(rename = "集計年")]
    pub year: i64,
    #[serde(rename = "一人当たり賃金（万円）")]
    pub per_capita_wage: Option<f64>,
    #[serde(rename = "所定内給与額（万円）")]
    pub scheduled_salary: Option<f64>,
    #[serde(rename = "年間賞与その他特別給与額（万円）")]
    pub annual_bonus: Option<f64>,
}

impl BatchRecord for WageRecord {}

/// National wages for one industry major category, age bracket and year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWageRecord {
    #[serde(rename = "産業大分類名")]
    pub industry_category: String,
    #[serde(rename = "年齢")]
    pub age: String,
    #[serde(rename = "集計年")]
    pub year: i64,
    #[serde(rename = "一人当たり賃金（万円）")]
    pub per_capita_wage: Option<f64>,
    #[serde(rename = "所定内給与額（万円）")]
    pub scheduled_salary: Option<f64>,
    #[serde(rename = "年間賞与その他特別給与額（万円）")]
    pub annual_bonus: Option<f64>,
}

impl BatchRecord for CategoryWageRecord {}

impl CategoryWageRecord {
    /// Value of the given metric for this row
    #[must_use]
    pub const fn metric(&self, metric: WageMetric) -> Option<f64> {
        match metric {
            WageMetric::ScheduledSalary => self.scheduled_salary,
            WageMetric::Bonus => self.annual_bonus,
            WageMetric::PerCapita => self.per_capita_wage,
        }
    }
}
