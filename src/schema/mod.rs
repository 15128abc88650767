//! Column labels and Arrow schemas for the wage sources
//!
//! Column names are the domain-language labels used by the published CSV
//! files and are treated as fixed string keys throughout the pipeline.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};

/// Age bracket
pub const AGE: &str = "年齢";
/// Aggregation year
pub const YEAR: &str = "集計年";
/// Prefecture name
pub const PREFECTURE: &str = "都道府県名";
/// Industry major category
pub const INDUSTRY_CATEGORY: &str = "産業大分類名";
/// Per-capita wage (10k yen)
pub const PER_CAPITA_WAGE: &str = "一人当たり賃金（万円）";
/// Scheduled salary (10k yen)
pub const SCHEDULED_SALARY: &str = "所定内給与額（万円）";
/// Annual bonus and other special payments (10k yen)
pub const ANNUAL_BONUS: &str = "年間賞与その他特別給与額（万円）";

/// Prefecture name as written in the coordinate lookup file
pub const GEO_PREFECTURE: &str = "pref_name";
pub const LONGITUDE: &str = "lon";
pub const LATITUDE: &str = "lat";

/// Age bracket value aggregating every age group
pub const ALL_AGES: &str = "年齢計";

/// Min-max normalized per-capita wage added to the heat map table
pub const RELATIVE_WAGE: &str = "一人当たり賃金（相対値）";
/// National per-capita wage after renaming for the time series
pub const NATIONAL_MEAN_WAGE: &str = "全国平均賃金";
/// Selected prefecture per-capita wage after renaming for the time series
pub const PREFECTURE_MEAN_WAGE: &str = "平均賃金";

fn wage_fields() -> [Field; 3] {
    [
        Field::new(PER_CAPITA_WAGE, DataType::Float64, true),
        Field::new(SCHEDULED_SALARY, DataType::Float64, true),
        Field::new(ANNUAL_BONUS, DataType::Float64, true),
    ]
}

/// Arrow schema for national wages across all industries
#[must_use]
pub fn national_schema() -> Arc<Schema> {
    let mut fields = vec![
        Field::new(AGE, DataType::Utf8, false),
        Field::new(YEAR, DataType::Int64, false),
    ];
    fields.extend(wage_fields());
    Arc::new(Schema::new(fields))
}

/// Arrow schema for national wages by industry major category
#[must_use]
pub fn national_by_category_schema() -> Arc<Schema> {
    let mut fields = vec![
        Field::new(INDUSTRY_CATEGORY, DataType::Utf8, false),
        Field::new(AGE, DataType::Utf8, false),
        Field::new(YEAR, DataType::Int64, false),
    ];
    fields.extend(wage_fields());
    Arc::new(Schema::new(fields))
}

/// Arrow schema for prefecture wages across all industries
#[must_use]
pub fn prefecture_schema() -> Arc<Schema> {
    let mut fields = vec![
        Field::new(PREFECTURE, DataType::Utf8, false),
        Field::new(AGE, DataType::Utf8, false),
        Field::new(YEAR, DataType::Int64, false),
    ];
    fields.extend(wage_fields());
    Arc::new(Schema::new(fields))
}

/// Arrow schema for the prefecture coordinate lookup, as found in the file
#[must_use]
pub fn geo_lookup_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new(GEO_PREFECTURE, DataType::Utf8, false),
        Field::new(LONGITUDE, DataType::Float64, false),
        Field::new(LATITUDE, DataType::Float64, false),
    ]))
}

/// The fixed set of tabular sources the dashboard reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    National,
    NationalByCategory,
    Prefecture,
    GeoLookup,
}

impl SourceKind {
    pub const ALL: [Self; 4] = [
        Self::National,
        Self::NationalByCategory,
        Self::Prefecture,
        Self::GeoLookup,
    ];

    /// Human-readable source name used in logs and errors
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::National => "national wages",
            Self::NationalByCategory => "national wages by category",
            Self::Prefecture => "prefecture wages",
            Self::GeoLookup => "prefecture coordinates",
        }
    }

    /// Columns the loaded table is projected and cast to
    #[must_use]
    pub fn schema(self) -> Arc<Schema> {
        match self {
            Self::National => national_schema(),
            Self::NationalByCategory => national_by_category_schema(),
            Self::Prefecture => prefecture_schema(),
            Self::GeoLookup => geo_lookup_schema(),
        }
    }
}
