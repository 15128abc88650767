//! Source table loading
//!
//! Every source is decoded from its configured text encoding, parsed as CSV
//! with a header row, then projected and cast to the fixed column set of its
//! [`SourceKind`]. Loading is all-or-nothing: the first failing source aborts.

use std::collections::HashSet;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::ArrayRef;
use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use encoding_rs::Encoding;

use crate::config::{DashboardConfig, SourceConfig};
use crate::error::util::safe_read_bytes;
use crate::error::{DashboardError, Result};
use crate::schema::{GEO_PREFECTURE, PREFECTURE, SourceKind};
use crate::transform::{rename_column, unique_values};
use crate::utils::arrow::get_column;
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
    log_warning,
};

/// The four source tables, read-only for the rest of the session
#[derive(Debug, Clone)]
pub struct RawTables {
    /// National wages across all industries
    pub national: RecordBatch,
    /// National wages by industry major category
    pub national_by_category: RecordBatch,
    /// Prefecture wages across all industries
    pub prefecture: RecordBatch,
    /// Prefecture coordinates, keyed by `都道府県名`
    pub geo_lookup: RecordBatch,
}

impl RawTables {
    /// Prefectures present in only one of the wage table and the coordinate lookup
    ///
    /// These are the prefectures the heat map's inner join will silently drop.
    pub fn unmatched_prefectures(&self) -> Result<Vec<String>> {
        let wages: Vec<String> = unique_values(&self.prefecture, PREFECTURE)?;
        let coords: Vec<String> = unique_values(&self.geo_lookup, PREFECTURE)?;
        let wage_set: HashSet<&String> = wages.iter().collect();
        let coord_set: HashSet<&String> = coords.iter().collect();

        Ok(wages
            .iter()
            .filter(|name| !coord_set.contains(name))
            .chain(coords.iter().filter(|name| !wage_set.contains(name)))
            .cloned()
            .collect())
    }
}

/// Decode raw bytes with the given encoding, rejecting malformed input
///
/// A leading byte order mark is honoured and stripped.
pub fn decode_source(bytes: &[u8], encoding: &'static Encoding) -> std::result::Result<String, String> {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(format!("Input is not valid {}", used.name()));
    }
    Ok(text.into_owned())
}

/// Parse CSV text and conform it to `target`
///
/// Every column is first read as text so that header-only or sparsely typed
/// files parse the same way; required columns are then cast to their target
/// types. Columns not named by `target` are dropped.
pub fn parse_csv(text: &str, target: &Schema, batch_size: usize) -> Result<RecordBatch> {
    let format = Format::default().with_header(true);
    let (inferred, _) = format.infer_schema(Cursor::new(text.as_bytes()), Some(1))?;

    if let Some(missing) = target
        .fields()
        .iter()
        .find(|field| inferred.column_with_name(field.name()).is_none())
    {
        return Err(DashboardError::column_not_found(missing.name()));
    }

    let text_schema = Arc::new(Schema::new(
        inferred
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let reader = ReaderBuilder::new(Arc::clone(&text_schema))
        .with_header(true)
        .with_batch_size(batch_size)
        .build(Cursor::new(text.as_bytes()))?;
    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    let raw = concat_batches(&text_schema, &batches)?;

    let columns = target
        .fields()
        .iter()
        .map(|field| get_column(&raw, field.name(), field.data_type()))
        .collect::<Result<Vec<ArrayRef>>>()?;

    Ok(RecordBatch::try_new(Arc::new(target.clone()), columns)?)
}

/// Read one source into a table with its fixed column set
pub fn read_source(kind: SourceKind, source: &SourceConfig, batch_size: usize) -> Result<RecordBatch> {
    let start = Instant::now();
    log_operation_start(&format!("Loading {}", kind.name()), &source.path);

    let bytes = safe_read_bytes(&source.path, kind.name())?;
    let text = decode_source(&bytes, source.encoding)
        .map_err(|reason| DashboardError::load(kind.name(), &source.path, reason))?;
    let table = parse_csv(&text, &kind.schema(), batch_size)
        .map_err(|e| DashboardError::load(kind.name(), &source.path, e.to_string()))?;

    log_operation_complete("loaded", &source.path, table.num_rows(), Some(start.elapsed()));
    Ok(table)
}

/// Load every dashboard source
///
/// The coordinate lookup's `pref_name` column is renamed to `都道府県名` so it
/// joins against the prefecture wage table.
pub fn load_datasets(config: &DashboardConfig) -> Result<RawTables> {
    let pb = create_main_progress_bar(
        SourceKind::ALL.len() as u64,
        Some("Loading wage sources"),
        config.show_progress,
    );

    let load = |kind: SourceKind, source: &SourceConfig| {
        pb.set_message(kind.name());
        let table = read_source(kind, source, config.batch_size);
        pb.inc(1);
        table
    };

    let national = load(SourceKind::National, &config.national)?;
    let national_by_category = load(SourceKind::NationalByCategory, &config.national_by_category)?;
    let prefecture = load(SourceKind::Prefecture, &config.prefecture)?;
    let geo_raw = load(SourceKind::GeoLookup, &config.geo_lookup)?;
    let geo_lookup = rename_column(&geo_raw, GEO_PREFECTURE, PREFECTURE).map_err(|e| {
        DashboardError::load(SourceKind::GeoLookup.name(), &config.geo_lookup.path, e.to_string())
    })?;

    finish_progress_bar(&pb, Some("All wage sources loaded"));

    let tables = RawTables {
        national,
        national_by_category,
        prefecture,
        geo_lookup,
    };

    let unmatched = tables.unmatched_prefectures()?;
    if !unmatched.is_empty() {
        log_warning(
            &format!(
                "{} prefectures lack either wages or coordinates and will be missing from the heat map: {}",
                unmatched.len(),
                unmatched.join(", ")
            ),
            Some(&config.geo_lookup.path),
        );
    }

    Ok(tables)
}
