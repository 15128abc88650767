use wage_dash::dashboard::{ATTRIBUTION, INDUSTRY_HEADER, METRIC_LABEL, PREFECTURE_LABEL, YEAR_LABEL};
use wage_dash::schema::{PREFECTURE_MEAN_WAGE, RELATIVE_WAGE, YEAR};
use wage_dash::utils::arrow::{float64_column, int64_column};
use wage_dash::utils::test::{prefecture_batch, sample_raw_tables};
use wage_dash::{
    Dashboard, DashboardConfig, DashboardError, SelectionChange, ViewKind, WageMetric,
    load_datasets,
};

use encoding_rs::SHIFT_JIS;

use crate::utils::{CATEGORY_CSV, NATIONAL_CSV, ScriptedPresenter, write_data_dir, write_encoded};

fn loaded_dashboard() -> Dashboard {
    let dir = tempfile::tempdir().unwrap();
    let config = write_data_dir(dir.path());
    let tables = load_datasets(&config).unwrap();
    Dashboard::new(tables, &config).unwrap()
}

#[test]
fn test_defaults_from_loaded_sources() {
    let dashboard = loaded_dashboard();
    let selection = dashboard.selection();
    assert_eq!(selection.selected_prefecture, "東京都");
    assert_eq!(selection.selected_year, 2018);
    assert_eq!(selection.selected_wage_metric, WageMetric::ScheduledSalary);
    assert!(!selection.show_raw_table);

    assert_eq!(
        dashboard.options().prefectures,
        vec!["東京都", "大阪府", "沖縄県"]
    );
    assert_eq!(dashboard.options().years, vec![2018, 2019]);
}

#[test]
fn test_heat_map_drops_prefectures_without_coordinates() {
    let dashboard = loaded_dashboard();
    let heat_map = &dashboard.views().heat_map;
    assert_eq!(heat_map.num_rows(), 2);

    let relative = float64_column(heat_map, RELATIVE_WAGE).unwrap();
    assert_eq!(relative.value(0), 1.0);
    assert_eq!(relative.value(1), 0.0);

    let view = dashboard.heat_map_view().unwrap();
    assert_eq!(view.points.len(), 2);
    assert!(view.points.iter().all(|p| (0.0..=1.0).contains(&p.weight)));
}

#[test]
fn test_osaka_to_tokyo_changes_only_prefecture_series() {
    let mut dashboard = loaded_dashboard();
    dashboard
        .apply(SelectionChange::Prefecture("大阪府".into()))
        .unwrap();
    let osaka = dashboard.views().time_series.clone();
    let recomputed = dashboard
        .apply(SelectionChange::Prefecture("東京都".into()))
        .unwrap();
    assert_eq!(recomputed.into_iter().collect::<Vec<_>>(), vec![ViewKind::TimeSeries]);
    let tokyo = &dashboard.views().time_series;

    assert_eq!(osaka.schema(), tokyo.schema());
    assert_eq!(
        int64_column(&osaka, YEAR).unwrap(),
        int64_column(tokyo, YEAR).unwrap()
    );
    assert_eq!(osaka.column(1), tokyo.column(1));
    let osaka_means: Vec<f64> = float64_column(&osaka, PREFECTURE_MEAN_WAGE)
        .unwrap()
        .values()
        .to_vec();
    let tokyo_means: Vec<f64> = float64_column(tokyo, PREFECTURE_MEAN_WAGE)
        .unwrap()
        .values()
        .to_vec();
    assert_eq!(osaka_means, vec![530.0, 540.0]);
    assert_eq!(tokyo_means, vec![610.0, 620.0]);
}

#[test]
fn test_prefecture_with_partial_years() {
    let mut dashboard = loaded_dashboard();
    dashboard
        .apply(SelectionChange::Prefecture("沖縄県".into()))
        .unwrap();
    let line = dashboard.line_chart_view().unwrap();
    assert_eq!(line.rows.len(), 1);
    assert_eq!(line.rows[0].year, 2019);
    assert_eq!(line.rows[0].national_mean, Some(500.0));
}

#[test]
fn test_scripted_render_applies_choices() {
    let mut dashboard = loaded_dashboard();
    let per_capita = WageMetric::PerCapita.to_string();
    let mut presenter =
        ScriptedPresenter::new(&[Some("大阪府"), Some("2019"), Some(per_capita.as_str())]);
    presenter.checkbox = Some(true);

    dashboard.render(&mut presenter).unwrap();

    let selection = dashboard.selection();
    assert_eq!(selection.selected_prefecture, "大阪府");
    assert_eq!(selection.selected_year, 2019);
    assert_eq!(selection.selected_wage_metric, WageMetric::PerCapita);
    assert!(selection.show_raw_table);

    // raw heat map table, then the time series for the chosen prefecture
    assert_eq!(presenter.tables.len(), 2);
    assert!(presenter.tables[0].schema().column_with_name(RELATIVE_WAGE).is_some());
    assert_eq!(
        float64_column(&presenter.tables[1], PREFECTURE_MEAN_WAGE)
            .unwrap()
            .value(0),
        530.0
    );
    assert_eq!(presenter.line_rows, vec![2]);
    assert_eq!(presenter.bar_upper_bounds, vec![530.0 + 20.0]);

    let selects: Vec<&str> = presenter
        .events
        .iter()
        .filter_map(|e| e.strip_prefix("select:"))
        .collect();
    assert_eq!(selects, vec![PREFECTURE_LABEL, YEAR_LABEL, METRIC_LABEL]);

    let industry = presenter
        .events
        .iter()
        .position(|e| *e == format!("header:{INDUSTRY_HEADER}"))
        .unwrap();
    assert_eq!(presenter.events[industry + 3], "bar:2");
    assert_eq!(
        presenter.events[presenter.events.len() - 2..],
        ATTRIBUTION.map(|t| format!("text:{t}"))
    );
}

#[test]
fn test_raw_table_hidden_by_default() {
    let mut dashboard = loaded_dashboard();
    let mut presenter = ScriptedPresenter::default();
    dashboard.render(&mut presenter).unwrap();

    // only the time series table is drawn
    assert_eq!(presenter.tables.len(), 1);
    assert!(presenter.events.iter().any(|e| e == "heat_map:2"));
    assert!(presenter.events.iter().any(|e| e == "scatter:2"));
}

#[test]
fn test_empty_wage_cells_are_left_off_charts() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_data_dir(dir.path());
    // blank bonus for one age bracket, blank per-capita wage for one industry
    let national = NATIONAL_CSV.replace(
        "20～24歳,2018,270.0,202.5,54.0",
        "20～24歳,2018,270.0,202.5,",
    );
    let category = CATEGORY_CSV.replace("製造業,年齢計,2018,520.0,", "製造業,年齢計,2018,,");
    write_encoded(&config.national.path, &national, SHIFT_JIS);
    write_encoded(&config.national_by_category.path, &category, SHIFT_JIS);

    let tables = load_datasets(&config).unwrap();
    assert_eq!(tables.national.num_rows(), 4);
    let mut dashboard = Dashboard::new(tables, &config).unwrap();

    let per_capita = WageMetric::PerCapita.to_string();
    let mut presenter = ScriptedPresenter::new(&[None, None, Some(per_capita.as_str())]);
    dashboard.render(&mut presenter).unwrap();

    assert!(presenter.events.iter().any(|e| e == "scatter:1"));
    let bubble = dashboard.bubble_chart_view().unwrap();
    assert_eq!(bubble.points.len(), 1);
    assert_eq!(bubble.points[0].animation_key, 2019);

    // 2018 is the default year; only 医療，福祉 has a per-capita wage
    let bar = dashboard.bar_chart_view().unwrap();
    assert_eq!(bar.bars.len(), 1);
    assert_eq!(bar.bars[0].category, "医療，福祉");
    assert_eq!(bar.range_x, [0.0, 430.0 + 20.0]);
    assert_eq!(
        presenter.events.last(),
        Some(&format!("text:{}", ATTRIBUTION[1]))
    );
}

#[test]
fn test_uniform_heat_map_wages_fail() {
    let mut tables = sample_raw_tables();
    tables.prefecture = prefecture_batch(&[
        ("北海道", "年齢計", 2019, 500.0),
        ("東京都", "年齢計", 2019, 500.0),
    ]);

    let err = Dashboard::new(tables, &DashboardConfig::default()).unwrap_err();
    assert!(matches!(err, DashboardError::DegenerateRange { value, .. } if value == 500.0));
}
