//! User selection state
//!
//! The selection decides which slice of data feeds the selection-driven
//! charts. Every change names the views it invalidates so the session can
//! recompute only those.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::loader::RawTables;
use crate::models::WageMetric;
use crate::pipeline::{prefecture_options, year_options};

/// Derived views that depend on the selection
///
/// The heat map and bubble chart read fixed slices and are never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ViewKind {
    TimeSeries,
    IndustryBar,
}

/// Values offered by each select box, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOptions {
    pub prefectures: Vec<String>,
    pub years: Vec<i64>,
    pub metrics: Vec<WageMetric>,
}

impl SelectionOptions {
    /// Option lists derived from the loaded sources
    pub fn from_tables(tables: &RawTables) -> Result<Self> {
        Ok(Self {
            prefectures: prefecture_options(&tables.prefecture)?,
            years: year_options(&tables.national_by_category)?,
            metrics: WageMetric::ALL.to_vec(),
        })
    }
}

/// The user's current choices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    pub selected_prefecture: String,
    pub selected_year: i64,
    pub selected_wage_metric: WageMetric,
    pub show_raw_table: bool,
}

impl SelectionState {
    /// First option of every list, raw table hidden
    ///
    /// An empty list falls back to an empty prefecture, year 0 or the first
    /// metric; the dependent views are then simply empty.
    #[must_use]
    pub fn defaults(options: &SelectionOptions) -> Self {
        Self {
            selected_prefecture: options.prefectures.first().cloned().unwrap_or_default(),
            selected_year: options.years.first().copied().unwrap_or_default(),
            selected_wage_metric: options
                .metrics
                .first()
                .copied()
                .unwrap_or(WageMetric::ALL[0]),
            show_raw_table: false,
        }
    }

    /// Apply a change, returning the views it invalidates
    ///
    /// Setting a field to its current value invalidates nothing.
    pub fn apply(&mut self, change: SelectionChange) -> BTreeSet<ViewKind> {
        let changed = match &change {
            SelectionChange::Prefecture(name) => self.selected_prefecture != *name,
            SelectionChange::Year(year) => self.selected_year != *year,
            SelectionChange::Metric(metric) => self.selected_wage_metric != *metric,
            SelectionChange::ShowRawTable(show) => self.show_raw_table != *show,
        };
        if !changed {
            return BTreeSet::new();
        }

        let affected = change.affected();
        match change {
            SelectionChange::Prefecture(name) => self.selected_prefecture = name,
            SelectionChange::Year(year) => self.selected_year = year,
            SelectionChange::Metric(metric) => self.selected_wage_metric = metric,
            SelectionChange::ShowRawTable(show) => self.show_raw_table = show,
        }
        affected
    }
}

/// A single user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    Prefecture(String),
    Year(i64),
    Metric(WageMetric),
    ShowRawTable(bool),
}

impl SelectionChange {
    /// Views whose data depends on the changed field
    #[must_use]
    pub fn affected(&self) -> BTreeSet<ViewKind> {
        match self {
            Self::Prefecture(_) => BTreeSet::from([ViewKind::TimeSeries]),
            Self::Year(_) | Self::Metric(_) => BTreeSet::from([ViewKind::IndustryBar]),
            // display toggle only
            Self::ShowRawTable(_) => BTreeSet::new(),
        }
    }
}
