//! Derived view-tables
//!
//! Each function composes the transforms in a fixed order to produce the
//! table one chart consumes. Nothing here is cached; callers re-derive a view
//! whenever the selection it depends on changes.

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::schema::{
    NATIONAL_MEAN_WAGE, PER_CAPITA_WAGE, PREFECTURE, PREFECTURE_MEAN_WAGE, RELATIVE_WAGE, YEAR,
};
use crate::transform::{
    filter_by_age_all, filter_by_age_not_all, filter_by_prefecture, filter_by_year, join_on,
    normalize, rename_column, select_columns, sort_by, unique_values,
};
use crate::utils::logging::log_table_derived;

fn derived(view: &str, table: RecordBatch) -> RecordBatch {
    log_table_derived(view, table.num_rows(), table.num_columns());
    table
}

/// All-ages prefecture wages for `year`, joined with coordinates and given a
/// normalized wage column
pub fn heat_map_table(
    prefecture: &RecordBatch,
    geo_lookup: &RecordBatch,
    year: i64,
) -> Result<RecordBatch> {
    let all_ages = filter_by_age_all(prefecture)?;
    let for_year = filter_by_year(&all_ages, year)?;
    let located = join_on(&for_year, geo_lookup, PREFECTURE)?;
    let table = normalize(&located, PER_CAPITA_WAGE, RELATIVE_WAGE)?;
    Ok(derived("heat map table", table))
}

/// National and selected-prefecture all-ages wages by year
///
/// Columns are `[集計年, 全国平均賃金, 平均賃金]`, sorted by year. Only years
/// present in both series appear.
pub fn time_series_table(
    national: &RecordBatch,
    prefecture: &RecordBatch,
    selected_prefecture: &str,
) -> Result<RecordBatch> {
    let national_mean = rename_column(
        &filter_by_age_all(national)?,
        PER_CAPITA_WAGE,
        NATIONAL_MEAN_WAGE,
    )?;

    let prefecture_mean = rename_column(
        &filter_by_age_all(prefecture)?,
        PER_CAPITA_WAGE,
        PREFECTURE_MEAN_WAGE,
    )?;
    let prefecture_mean = filter_by_prefecture(&prefecture_mean, selected_prefecture)?;

    let joined = join_on(&national_mean, &prefecture_mean, YEAR)?;
    let lines = select_columns(&joined, &[YEAR, NATIONAL_MEAN_WAGE, PREFECTURE_MEAN_WAGE])?;
    let table = sort_by(&lines, YEAR)?;
    Ok(derived("time series table", table))
}

/// National wages per individual age bracket
pub fn bubble_table(national: &RecordBatch) -> Result<RecordBatch> {
    Ok(derived("bubble table", filter_by_age_not_all(national)?))
}

/// Wages by industry category for one year
pub fn industry_bar_table(national_by_category: &RecordBatch, year: i64) -> Result<RecordBatch> {
    Ok(derived(
        "industry bar table",
        filter_by_year(national_by_category, year)?,
    ))
}

/// Prefectures offered for the time series, in source order
pub fn prefecture_options(prefecture: &RecordBatch) -> Result<Vec<String>> {
    unique_values(&filter_by_age_all(prefecture)?, PREFECTURE)
}

/// Years offered for the industry chart, in source order
pub fn year_options(national_by_category: &RecordBatch) -> Result<Vec<i64>> {
    unique_values(national_by_category, YEAR)
}
