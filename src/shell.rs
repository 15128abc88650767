//! Presentation shell boundary
//!
//! The dashboard drives widgets only through [`Presenter`]. A presenter owns
//! all rendering; the pipeline hands it finished tables and chart parameters.

use std::io::Write;

use arrow::record_batch::RecordBatch;
use serde::Serialize;

use crate::adapters::{BarChartView, BubbleChartView, HeatMapView, LineChartView};
use crate::error::Result;
use crate::utils::logging::{format_table, table_summary};

/// Widgets the dashboard renders into
pub trait Presenter {
    fn render_title(&mut self, text: &str) -> Result<()>;

    fn render_header(&mut self, text: &str) -> Result<()>;

    /// Show a select box and return the index of the chosen option
    ///
    /// `current` is the index selected before this render.
    fn render_select_box(&mut self, label: &str, options: &[String], current: usize)
    -> Result<usize>;

    /// Show a checkbox and return whether it is checked
    fn render_checkbox(&mut self, label: &str, current: bool) -> Result<bool>;

    fn render_table(&mut self, table: &RecordBatch) -> Result<()>;

    fn render_heat_map(&mut self, view: &HeatMapView) -> Result<()>;

    fn render_line_chart(&mut self, view: &LineChartView) -> Result<()>;

    fn render_scatter(&mut self, view: &BubbleChartView) -> Result<()>;

    fn render_bar(&mut self, view: &BarChartView) -> Result<()>;

    fn render_text(&mut self, text: &str) -> Result<()>;
}

/// Non-interactive presenter writing the page as text
///
/// Tables are drawn as grids and chart parameters as pretty JSON. Select
/// boxes and checkboxes keep their current value.
#[derive(Debug)]
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl<W: Write> ConsolePresenter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_chart<T: Serialize>(&mut self, kind: &str, view: &T) -> Result<()> {
        writeln!(self.out, "[{kind}]")?;
        serde_json::to_writer_pretty(&mut self.out, view)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn render_title(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        writeln!(self.out, "{}", "=".repeat(text.chars().count() * 2))?;
        Ok(())
    }

    fn render_header(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "\n{text}")?;
        Ok(())
    }

    fn render_select_box(
        &mut self,
        label: &str,
        options: &[String],
        current: usize,
    ) -> Result<usize> {
        writeln!(self.out, "{label}:")?;
        for (idx, option) in options.iter().enumerate() {
            let marker = if idx == current { ">" } else { " " };
            writeln!(self.out, " {marker} {option}")?;
        }
        Ok(current)
    }

    fn render_checkbox(&mut self, label: &str, current: bool) -> Result<bool> {
        let mark = if current { "x" } else { " " };
        writeln!(self.out, "[{mark}] {label}")?;
        Ok(current)
    }

    fn render_table(&mut self, table: &RecordBatch) -> Result<()> {
        writeln!(self.out, "{}", table_summary(table))?;
        writeln!(self.out, "{}", format_table(table)?)?;
        Ok(())
    }

    fn render_heat_map(&mut self, view: &HeatMapView) -> Result<()> {
        self.render_chart("heat map", view)
    }

    fn render_line_chart(&mut self, view: &LineChartView) -> Result<()> {
        self.render_chart("line chart", view)
    }

    fn render_scatter(&mut self, view: &BubbleChartView) -> Result<()> {
        self.render_chart("scatter", view)
    }

    fn render_bar(&mut self, view: &BarChartView) -> Result<()> {
        self.render_chart("bar", view)
    }

    fn render_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }
}
