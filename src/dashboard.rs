//! Dashboard session
//!
//! Owns the raw tables, the user's selection and the current derived
//! view-tables. A selection change recomputes only the views that depend on
//! the changed field.

use std::collections::BTreeSet;

use arrow::record_batch::RecordBatch;
use log::debug;

use crate::adapters::{
    BarChartAdapter, BarChartView, BubbleChartAdapter, BubbleChartView, HeatMapAdapter,
    HeatMapView, LineChartAdapter, LineChartView, ViewAdapter,
};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::loader::RawTables;
use crate::pipeline::{bubble_table, heat_map_table, industry_bar_table, time_series_table};
use crate::selection::{SelectionChange, SelectionOptions, SelectionState, ViewKind};
use crate::shell::Presenter;

pub const TITLE: &str = "「日本の賃金データ」ダッシュボード";
pub const TIME_SERIES_HEADER: &str = "■集計年別の一人当たり賃金の推移";
pub const BUBBLE_HEADER: &str = "■年齢階級別の全国平均賃金";
pub const INDUSTRY_HEADER: &str = "■産業別の賃金推移";
pub const SHOW_TABLE_LABEL: &str = "Show DataFrame";
pub const PREFECTURE_LABEL: &str = "都道府県";
pub const YEAR_LABEL: &str = "集計年を選んでね";
pub const METRIC_LABEL: &str = "表示する賃金項目を選んでね";
pub const ATTRIBUTION: [&str; 2] = [
    "出典：RESAS（地域経済分析システム）",
    "本結果はRESAS（地域経済分析システム）を加工して作成",
];

/// Current table behind each chart
#[derive(Debug, Clone)]
pub struct ViewTables {
    pub heat_map: RecordBatch,
    pub time_series: RecordBatch,
    pub bubble: RecordBatch,
    pub industry_bar: RecordBatch,
}

#[derive(Debug)]
pub struct Dashboard {
    tables: RawTables,
    options: SelectionOptions,
    selection: SelectionState,
    heat_map_year: i64,
    heat_map: HeatMapAdapter,
    views: ViewTables,
}

impl Dashboard {
    /// Derive every view from the loaded tables with the default selection
    pub fn new(tables: RawTables, config: &DashboardConfig) -> Result<Self> {
        let options = SelectionOptions::from_tables(&tables)?;
        let selection = SelectionState::defaults(&options);
        let heat_map_year = config.heat_map_year;

        let views = ViewTables {
            heat_map: heat_map_table(&tables.prefecture, &tables.geo_lookup, heat_map_year)?,
            time_series: time_series_table(
                &tables.national,
                &tables.prefecture,
                &selection.selected_prefecture,
            )?,
            bubble: bubble_table(&tables.national)?,
            industry_bar: industry_bar_table(&tables.national_by_category, selection.selected_year)?,
        };

        Ok(Self {
            tables,
            options,
            selection,
            heat_map_year,
            heat_map: HeatMapAdapter::default(),
            views,
        })
    }

    pub const fn options(&self) -> &SelectionOptions {
        &self.options
    }

    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub const fn views(&self) -> &ViewTables {
        &self.views
    }

    /// Apply a selection change and recompute the views it invalidates
    ///
    /// Returns the recomputed views. A change that leaves the selection as
    /// it was recomputes nothing.
    pub fn apply(&mut self, change: SelectionChange) -> Result<BTreeSet<ViewKind>> {
        let affected = self.selection.apply(change);
        for view in &affected {
            self.recompute(*view)?;
        }
        Ok(affected)
    }

    fn recompute(&mut self, view: ViewKind) -> Result<()> {
        debug!("Recomputing {view:?} view");
        match view {
            ViewKind::TimeSeries => {
                self.views.time_series = time_series_table(
                    &self.tables.national,
                    &self.tables.prefecture,
                    &self.selection.selected_prefecture,
                )?;
            }
            ViewKind::IndustryBar => {
                self.views.industry_bar = industry_bar_table(
                    &self.tables.national_by_category,
                    self.selection.selected_year,
                )?;
            }
        }
        Ok(())
    }

    pub fn heat_map_view(&self) -> Result<HeatMapView> {
        self.heat_map.adapt(&self.views.heat_map)
    }

    pub fn line_chart_view(&self) -> Result<LineChartView> {
        LineChartAdapter.adapt(&self.views.time_series)
    }

    pub fn bubble_chart_view(&self) -> Result<BubbleChartView> {
        BubbleChartAdapter.adapt(&self.views.bubble)
    }

    pub fn bar_chart_view(&self) -> Result<BarChartView> {
        BarChartAdapter::new(self.selection.selected_wage_metric).adapt(&self.views.industry_bar)
    }

    /// Render the page top to bottom
    ///
    /// Widget answers are applied as selection changes before the section
    /// that depends on them is drawn.
    pub fn render<P: Presenter>(&mut self, presenter: &mut P) -> Result<()> {
        presenter.render_title(TITLE)?;

        presenter.render_header(&format!(
            "■{}年：一人当たり賃金のヒートマップ",
            self.heat_map_year
        ))?;
        presenter.render_heat_map(&self.heat_map_view()?)?;
        let show = presenter.render_checkbox(SHOW_TABLE_LABEL, self.selection.show_raw_table)?;
        self.apply(SelectionChange::ShowRawTable(show))?;
        if self.selection.show_raw_table {
            presenter.render_table(&self.views.heat_map)?;
        }

        presenter.render_header(TIME_SERIES_HEADER)?;
        let prefectures = self.options.prefectures.clone();
        let current = position(&prefectures, &self.selection.selected_prefecture);
        let chosen = presenter.render_select_box(PREFECTURE_LABEL, &prefectures, current)?;
        if let Some(name) = prefectures.get(chosen) {
            self.apply(SelectionChange::Prefecture(name.clone()))?;
        }
        presenter.render_table(&self.views.time_series)?;
        presenter.render_line_chart(&self.line_chart_view()?)?;

        presenter.render_header(BUBBLE_HEADER)?;
        presenter.render_scatter(&self.bubble_chart_view()?)?;

        presenter.render_header(INDUSTRY_HEADER)?;
        let years = self.options.years.clone();
        let labels: Vec<String> = years.iter().map(ToString::to_string).collect();
        let current = position(&years, &self.selection.selected_year);
        if let Some(year) = years.get(presenter.render_select_box(YEAR_LABEL, &labels, current)?) {
            self.apply(SelectionChange::Year(*year))?;
        }
        let metrics = self.options.metrics.clone();
        let labels: Vec<String> = metrics.iter().map(ToString::to_string).collect();
        let current = position(&metrics, &self.selection.selected_wage_metric);
        if let Some(metric) =
            metrics.get(presenter.render_select_box(METRIC_LABEL, &labels, current)?)
        {
            self.apply(SelectionChange::Metric(*metric))?;
        }
        presenter.render_bar(&self.bar_chart_view()?)?;

        for line in ATTRIBUTION {
            presenter.render_text(line)?;
        }
        Ok(())
    }
}

fn position<T: PartialEq>(options: &[T], current: &T) -> usize {
    options.iter().position(|o| o == current).unwrap_or(0)
}
