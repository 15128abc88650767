use std::fs;

use encoding_rs::{SHIFT_JIS, UTF_8};
use wage_dash::schema::{ANNUAL_BONUS, PREFECTURE, YEAR};
use wage_dash::utils::arrow::{int64_column, string_column};
use wage_dash::{DashboardError, load_datasets};

use crate::utils::{NATIONAL_CSV, write_data_dir, write_encoded};

#[test]
fn test_load_all_sources_from_disk() -> wage_dash::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = write_data_dir(dir.path());

    let tables = load_datasets(&config)?;
    assert_eq!(tables.national.num_rows(), 4);
    assert_eq!(tables.national_by_category.num_rows(), 4);
    assert_eq!(tables.prefecture.num_rows(), 6);
    assert_eq!(tables.geo_lookup.num_rows(), 2);

    // extra source columns are dropped
    assert!(tables.prefecture.schema().column_with_name("都道府県コード").is_none());
    assert_eq!(
        string_column(&tables.prefecture, PREFECTURE)?.value(0),
        "東京都"
    );
    assert_eq!(int64_column(&tables.national, YEAR)?.value(1), 2019);

    // the coordinate lookup joins on the prefecture column
    assert!(tables.geo_lookup.schema().column_with_name(PREFECTURE).is_some());
    assert!(tables.geo_lookup.schema().column_with_name("pref_name").is_none());

    assert_eq!(tables.unmatched_prefectures()?, vec!["沖縄県".to_string()]);
    Ok(())
}

#[test]
fn test_missing_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_data_dir(dir.path());
    fs::remove_file(&config.prefecture.path).unwrap();

    let err = load_datasets(&config).unwrap_err();
    assert!(err.is_load_error());
    match err {
        DashboardError::Load { source_name, path, .. } => {
            assert_eq!(source_name, "prefecture wages");
            assert_eq!(path, config.prefecture.path);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_column_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_data_dir(dir.path());
    let without_bonus = NATIONAL_CSV
        .lines()
        .map(|line| line.rsplit_once(',').map_or(line, |(head, _)| head))
        .collect::<Vec<_>>()
        .join("\n");
    write_encoded(&config.national.path, &without_bonus, SHIFT_JIS);

    let err = load_datasets(&config).unwrap_err();
    assert!(err.is_load_error());
    assert!(err.to_string().contains(ANNUAL_BONUS));
}

#[test]
fn test_undecodable_bytes_are_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_data_dir(dir.path());
    let mut bytes = SHIFT_JIS.encode("年齢,集計年\n").0.into_owned();
    bytes.extend_from_slice(&[0xFF, 0xFF, b'\n']);
    fs::write(&config.national_by_category.path, bytes).unwrap();

    let err = load_datasets(&config).unwrap_err();
    assert!(err.is_load_error());
    assert!(err.to_string().contains("Shift_JIS"));
}

#[test]
fn test_non_numeric_year_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_data_dir(dir.path());
    write_encoded(
        &config.geo_lookup.path,
        "pref_name,lon,lat\n東京都,east,35.6\n",
        UTF_8,
    );

    let err = load_datasets(&config).unwrap_err();
    assert!(err.is_load_error());
    assert!(err.to_string().contains("Column 'lon'"));
}
