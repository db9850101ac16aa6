//! Loading WGMS sheets into in-memory models
//!
//! Two sheets are supported:
//! - the glacier sheet, one row per glacier, loaded into a [`GlacierCollection`]
//! - the mass-balance sheet, one row per glacier-year, filtered to a
//!   [`MassBalanceSeries`] for a single glacier
//!
//! Both are gated by [`check_schema`] before any row is read.

use super::schema_checker::{check_schema, open_csv, read_header};
use crate::app::models::{Glacier, GlacierCode, GlacierCollection, MassBalanceSeries};
use crate::constants::{glacier_columns, mass_balance_columns};
use crate::{Error, Result};
use csv::StringRecord;
use std::path::Path;
use tracing::{debug, info};

/// Position of a named column in a header
fn column_index(header: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    header
        .iter()
        .position(|column| column == name)
        .ok_or_else(|| Error::missing_column(name, path.display().to_string()))
}

/// Trimmed field value, empty when the row is short
fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

fn parse_number<T: std::str::FromStr>(
    raw: &str,
    column: &str,
    row: usize,
    path: &Path,
) -> Result<T> {
    raw.parse().map_err(|_| {
        Error::invalid_value(format!(
            "{} row {}: invalid {} value '{}'",
            path.display(),
            row,
            column,
            raw
        ))
    })
}

/// Load every glacier in a WGMS glacier sheet
///
/// The classification code is built by concatenating `PRIM_CLASSIFIC`, `FORM`
/// and `FRONTAL_CHARS` and classified with [`GlacierCode::from_digits`].
/// Glaciers keep the sheet's row order.
pub fn load_glaciers(path: &Path) -> Result<GlacierCollection> {
    check_schema(path, glacier_columns::REQUIRED)?;

    let mut reader = open_csv(path)?;
    let header = read_header(&mut reader, path)?;

    let unit_idx = column_index(&header, glacier_columns::POLITICAL_UNIT, path)?;
    let name_idx = column_index(&header, glacier_columns::NAME, path)?;
    let id_idx = column_index(&header, glacier_columns::WGMS_ID, path)?;
    let lat_idx = column_index(&header, glacier_columns::LATITUDE, path)?;
    let lon_idx = column_index(&header, glacier_columns::LONGITUDE, path)?;
    let class_idx = column_index(&header, glacier_columns::PRIM_CLASSIFIC, path)?;
    let form_idx = column_index(&header, glacier_columns::FORM, path)?;
    let frontal_idx = column_index(&header, glacier_columns::FRONTAL_CHARS, path)?;

    let mut collection = GlacierCollection::new();

    for (i, record) in reader.records().enumerate() {
        // Row 1 is the header
        let row = i + 2;
        let record = record.map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                format!("Failed to read row {}", row),
                Some(e),
            )
        })?;

        let latitude: f64 = parse_number(
            field(&record, lat_idx),
            glacier_columns::LATITUDE,
            row,
            path,
        )?;
        let longitude: f64 = parse_number(
            field(&record, lon_idx),
            glacier_columns::LONGITUDE,
            row,
            path,
        )?;

        let code = GlacierCode::from_digits(&format!(
            "{}{}{}",
            field(&record, class_idx),
            field(&record, form_idx),
            field(&record, frontal_idx)
        ));

        let glacier = Glacier::new(
            field(&record, id_idx),
            field(&record, name_idx),
            field(&record, unit_idx),
            latitude,
            longitude,
            code,
        )
        .map_err(|e| match e {
            Error::InvalidCoordinate {
                latitude,
                longitude,
                message,
            } => Error::invalid_coordinate(
                latitude,
                longitude,
                format!("{} row {}: {}", path.display(), row, message),
            ),
            other => other,
        })?;

        collection.insert(glacier)?;
    }

    info!(
        "Loaded {} glaciers from {}",
        collection.len(),
        path.display()
    );
    Ok(collection)
}

/// Load the annual mass-balance series of one glacier
///
/// Rows for other glaciers and rows without an annual balance are skipped.
/// The series is sorted by year.
pub fn load_mass_balance(path: &Path, wgms_id: &str) -> Result<MassBalanceSeries> {
    check_schema(path, mass_balance_columns::REQUIRED)?;

    let mut reader = open_csv(path)?;
    let header = read_header(&mut reader, path)?;

    let id_idx = column_index(&header, mass_balance_columns::WGMS_ID, path)?;
    let year_idx = column_index(&header, mass_balance_columns::YEAR, path)?;
    let balance_idx = column_index(&header, mass_balance_columns::ANNUAL_BALANCE, path)?;

    let mut rows: Vec<(i32, f64)> = Vec::new();
    let mut skipped = 0usize;

    for (i, record) in reader.records().enumerate() {
        let row = i + 2;
        let record = record.map_err(|e| {
            Error::csv_parsing(
                path.display().to_string(),
                format!("Failed to read row {}", row),
                Some(e),
            )
        })?;

        if field(&record, id_idx) != wgms_id {
            continue;
        }

        let raw_balance = field(&record, balance_idx);
        if raw_balance.is_empty() {
            skipped += 1;
            continue;
        }

        let year: i32 = parse_number(field(&record, year_idx), mass_balance_columns::YEAR, row, path)?;
        let balance: f64 = parse_number(
            raw_balance,
            mass_balance_columns::ANNUAL_BALANCE,
            row,
            path,
        )?;
        rows.push((year, balance));
    }

    rows.sort_by_key(|(year, _)| *year);

    let mut series = MassBalanceSeries::new(wgms_id);
    for (year, balance) in rows {
        series.push(year, balance);
    }

    debug!(
        "Mass balance for {}: {} measurements, {} rows without a balance",
        wgms_id,
        series.len(),
        skipped
    );
    Ok(series)
}
