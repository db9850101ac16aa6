//! Data models for glacier analysis
//!
//! This module contains the core data structures for representing WGMS glacier
//! records, their classification codes, and mass-balance time series.

use crate::app::services::code_search::search_by_code;
use crate::app::services::geo_distance::distance;
use crate::app::services::validation::{validate_bounded_count, validate_coordinate};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Coordinate
// =============================================================================

/// A validated latitude/longitude pair in WGS84 decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        validate_coordinate(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to another coordinate in kilometres
    pub fn distance_to(&self, other: &Coordinate) -> Result<f64> {
        distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

// =============================================================================
// Glacier Codes
// =============================================================================

/// Identification code carried by a glacier record
///
/// Codes arrive either as text (e.g. `"E1a001"`, or digit strings with a
/// leading zero) or as integers. Equality is variant-sensitive: `Text("638")`
/// and `Number(638)` are different codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum GlacierCode {
    Number(i64),
    Text(String),
}

impl GlacierCode {
    /// Classify a raw code string
    ///
    /// Pure digit strings become [`GlacierCode::Number`] unless a leading zero
    /// would be lost, in which case they stay text so every position survives.
    pub fn from_digits(raw: &str) -> Self {
        let is_plain_number = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && (raw == "0" || !raw.starts_with('0'));

        if is_plain_number {
            if let Ok(value) = raw.parse::<i64>() {
                return Self::Number(value);
            }
        }

        Self::Text(raw.to_string())
    }
}

impl fmt::Display for GlacierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for GlacierCode {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for GlacierCode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for GlacierCode {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Pattern handed to the code search engine
///
/// In exact mode the pattern is compared to each record's code with
/// [`GlacierCode`] equality. In wildcard mode it is rendered as a string and
/// only its digit positions are compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePattern(GlacierCode);

impl CodePattern {
    /// Build a pattern from untyped input such as a CLI argument
    ///
    /// For exact searches pure digit strings are treated as numeric codes, the
    /// same way the sheet loader classifies them. Fails with
    /// [`Error::InvalidArgument`] for empty patterns or patterns containing
    /// whitespace.
    pub fn parse(raw: &str, full_code: bool) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::invalid_argument("code pattern must not be empty"));
        }

        if raw.chars().any(char::is_whitespace) {
            return Err(Error::invalid_argument(format!(
                "code pattern '{}' must not contain whitespace",
                raw
            )));
        }

        if full_code {
            Ok(Self(GlacierCode::from_digits(raw)))
        } else {
            Ok(Self(GlacierCode::Text(raw.to_string())))
        }
    }

    /// The pattern as a code value, for exact comparison
    pub fn as_code(&self) -> &GlacierCode {
        &self.0
    }
}

impl fmt::Display for CodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<GlacierCode> for CodePattern {
    fn from(value: GlacierCode) -> Self {
        Self(value)
    }
}

impl From<i64> for CodePattern {
    fn from(value: i64) -> Self {
        Self(GlacierCode::Number(value))
    }
}

impl From<&str> for CodePattern {
    fn from(value: &str) -> Self {
        Self(GlacierCode::Text(value.to_string()))
    }
}

/// Read interface the code search engine needs from a record
pub trait CodedRecord {
    /// Human-readable record name returned in search results
    fn name(&self) -> &str;

    /// Identification code matched against patterns
    fn code(&self) -> &GlacierCode;
}

// =============================================================================
// Glacier
// =============================================================================

/// A single glacier from the WGMS glacier sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Glacier {
    /// WGMS identifier, primary key for lookups
    pub id: String,

    /// Glacier name (e.g., "GRIES", "STORGLACIAEREN")
    pub name: String,

    /// Two-letter political unit (e.g., "CH", "SE")
    pub unit: String,

    /// Location of the glacier
    pub coordinate: Coordinate,

    /// Classification code (primary classification, form, frontal characteristics)
    pub code: GlacierCode,
}

impl Glacier {
    /// Create a new Glacier with validation
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        latitude: f64,
        longitude: f64,
        code: impl Into<GlacierCode>,
    ) -> Result<Self> {
        let glacier = Self {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
            coordinate: Coordinate::new(latitude, longitude)?,
            code: code.into(),
        };

        glacier.validate()?;
        Ok(glacier)
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_value("Glacier id cannot be empty"));
        }

        if self.name.trim().is_empty() {
            return Err(Error::invalid_value(format!(
                "Glacier {} has an empty name",
                self.id
            )));
        }

        Ok(())
    }
}

impl CodedRecord for Glacier {
    fn name(&self) -> &str {
        &self.name
    }

    fn code(&self) -> &GlacierCode {
        &self.code
    }
}

// =============================================================================
// Glacier Collection
// =============================================================================

/// Insertion-ordered collection of glaciers with O(1) lookup by WGMS id
///
/// Iteration yields glaciers in the order they were added, which is also the
/// order of code search results.
#[derive(Debug, Clone, Default)]
pub struct GlacierCollection {
    glaciers: Vec<Glacier>,
    index: HashMap<String, usize>,
}

impl GlacierCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a glacier, rejecting duplicate ids
    pub fn insert(&mut self, glacier: Glacier) -> Result<()> {
        if self.index.contains_key(&glacier.id) {
            return Err(Error::invalid_value(format!(
                "duplicate WGMS_ID {} in collection",
                glacier.id
            )));
        }

        self.index.insert(glacier.id.clone(), self.glaciers.len());
        self.glaciers.push(glacier);
        Ok(())
    }

    /// Get a glacier by WGMS id
    pub fn get(&self, id: &str) -> Option<&Glacier> {
        self.index.get(id).map(|&i| &self.glaciers[i])
    }

    /// Get a glacier by WGMS id, failing if absent
    pub fn require(&self, id: &str) -> Result<&Glacier> {
        self.get(id).ok_or_else(|| Error::unknown_glacier(id))
    }

    pub fn len(&self) -> usize {
        self.glaciers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glaciers.is_empty()
    }

    /// Iterate glaciers in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Glacier> {
        self.glaciers.iter()
    }

    /// Names of glaciers whose code matches `pattern`
    ///
    /// See [`search_by_code`] for exact and wildcard semantics.
    pub fn filter_by_code(&self, pattern: &CodePattern, full_code: bool) -> Vec<&str> {
        search_by_code(self, pattern, full_code)
    }

    /// The `n` glaciers closest to a point, nearest first, with distances in km
    ///
    /// Fails with [`Error::InvalidCoordinate`] for a bad point and
    /// [`Error::InvalidValue`] when `n` is negative or exceeds the collection size.
    pub fn find_nearest(&self, lat: f64, lon: f64, n: i64) -> Result<Vec<(&Glacier, f64)>> {
        let origin = Coordinate::new(lat, lon)?;
        let n = validate_bounded_count(n, self.len())?;

        let mut ranked = self
            .glaciers
            .iter()
            .map(|glacier| {
                origin
                    .distance_to(&glacier.coordinate)
                    .map(|km| (glacier, km))
            })
            .collect::<Result<Vec<_>>>()?;

        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.truncate(n);
        Ok(ranked)
    }
}

impl<'a> IntoIterator for &'a GlacierCollection {
    type Item = &'a Glacier;
    type IntoIter = std::slice::Iter<'a, Glacier>;

    fn into_iter(self) -> Self::IntoIter {
        self.glaciers.iter()
    }
}

// =============================================================================
// Mass Balance
// =============================================================================

/// Annual mass-balance measurements for one glacier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassBalanceSeries {
    /// WGMS id of the measured glacier
    pub wgms_id: String,

    /// Measurement years
    pub years: Vec<i32>,

    /// Annual balance per year in mm w.e.
    pub balances: Vec<f64>,
}

impl MassBalanceSeries {
    pub fn new(wgms_id: impl Into<String>) -> Self {
        Self {
            wgms_id: wgms_id.into(),
            ..Default::default()
        }
    }

    /// Append one measurement
    pub fn push(&mut self, year: i32, balance: f64) {
        self.years.push(year);
        self.balances.push(balance);
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Most recent measurement as (year, balance)
    pub fn latest(&self) -> Option<(i32, f64)> {
        self.years
            .iter()
            .zip(&self.balances)
            .max_by_key(|(year, _)| **year)
            .map(|(&year, &balance)| (year, balance))
    }
}
