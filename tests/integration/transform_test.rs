use wage_dash::schema::{AGE, ALL_AGES, PER_CAPITA_WAGE, PREFECTURE, RELATIVE_WAGE, YEAR};
use wage_dash::transform::{
    filter_by_age_all, filter_by_age_not_all, filter_by_prefecture, filter_by_year, join_on,
    normalize, rename_column, unique_values,
};
use wage_dash::utils::arrow::{float64_column, string_column};
use wage_dash::utils::test::{geo_batch, national_batch, prefecture_batch, sample_raw_tables};

#[test]
fn test_filters_are_idempotent() {
    let tables = sample_raw_tables();
    let once = filter_by_age_all(&tables.prefecture).unwrap();
    let twice = filter_by_age_all(&once).unwrap();
    assert_eq!(once, twice);

    let year = filter_by_year(&tables.prefecture, 2018).unwrap();
    assert_eq!(filter_by_year(&year, 2018).unwrap(), year);

    let osaka = filter_by_prefecture(&tables.prefecture, "大阪府").unwrap();
    assert_eq!(filter_by_prefecture(&osaka, "大阪府").unwrap(), osaka);
}

#[test]
fn test_age_filters_partition_every_source() {
    let tables = sample_raw_tables();
    for table in [&tables.national, &tables.national_by_category, &tables.prefecture] {
        let all = filter_by_age_all(table).unwrap();
        let rest = filter_by_age_not_all(table).unwrap();
        assert_eq!(all.num_rows() + rest.num_rows(), table.num_rows());
        assert!(string_column(&all, AGE).unwrap().iter().all(|a| a == Some(ALL_AGES)));
        assert!(string_column(&rest, AGE).unwrap().iter().all(|a| a != Some(ALL_AGES)));
    }
}

#[test]
fn test_filters_keep_schema_on_empty_result() {
    let tables = sample_raw_tables();
    let none = filter_by_year(&tables.national, 1999).unwrap();
    assert_eq!(none.num_rows(), 0);
    assert_eq!(none.schema(), tables.national.schema());
}

#[test]
fn test_join_without_common_keys_is_empty() {
    let prefecture = prefecture_batch(&[("東京都", "年齢計", 2019, 600.0)]);
    let geo = geo_batch(&[("北海道", 141.3, 43.1)]);
    let joined = join_on(&prefecture, &geo, PREFECTURE).unwrap();
    assert_eq!(joined.num_rows(), 0);
    assert_eq!(joined.num_columns(), prefecture.num_columns() + 2);
}

#[test]
fn test_normalized_values_stay_in_unit_range() {
    let tables = sample_raw_tables();
    let all_ages = filter_by_age_all(&tables.prefecture).unwrap();
    let table = normalize(&all_ages, PER_CAPITA_WAGE, RELATIVE_WAGE).unwrap();

    let relative = float64_column(&table, RELATIVE_WAGE).unwrap();
    assert!(relative.iter().flatten().all(|v| (0.0..=1.0).contains(&v)));
    assert_eq!(relative.iter().flatten().filter(|v| *v == 0.0).count(), 1);
    assert_eq!(relative.iter().flatten().filter(|v| *v == 1.0).count(), 1);
}

#[test]
fn test_rename_preserves_values() {
    let table = national_batch(&[("年齢計", 2019, 500.0), ("年齢計", 2018, 490.0)]);
    let renamed = rename_column(&table, PER_CAPITA_WAGE, "全国平均賃金").unwrap();
    assert_eq!(renamed.num_rows(), table.num_rows());
    assert_eq!(
        float64_column(&renamed, "全国平均賃金").unwrap(),
        float64_column(&table, PER_CAPITA_WAGE).unwrap()
    );
    assert!(renamed.schema().column_with_name(PER_CAPITA_WAGE).is_none());
}

#[test]
fn test_unique_values_first_seen_order() {
    let table = national_batch(&[
        ("年齢計", 2019, 500.0),
        ("20～24歳", 2017, 280.0),
        ("年齢計", 2017, 480.0),
        ("20～24歳", 2019, 300.0),
    ]);
    assert_eq!(unique_values::<i64>(&table, YEAR).unwrap(), vec![2019, 2017]);
    assert_eq!(
        unique_values::<String>(&table, AGE).unwrap(),
        vec!["年齢計", "20～24歳"]
    );
}
