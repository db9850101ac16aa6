//! Reusable precondition checks
//!
//! Every check fails fast with a descriptive error naming the offending value
//! and the constraint it broke. Nothing here touches the filesystem.

use crate::constants::{LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::{Error, Result};
use std::path::Path;

/// Validate a latitude/longitude pair in decimal degrees
///
/// Fails with [`Error::InvalidCoordinate`] when either value is NaN or
/// infinite, when latitude is outside [-90, 90], or when longitude is
/// outside [-180, 180].
pub fn validate_coordinate(lat: f64, lon: f64) -> Result<()> {
    if !lat.is_finite() {
        return Err(Error::invalid_coordinate(
            lat,
            lon,
            format!("latitude must be a finite number, got {}", lat),
        ));
    }

    if !lon.is_finite() {
        return Err(Error::invalid_coordinate(
            lat,
            lon,
            format!("longitude must be a finite number, got {}", lon),
        ));
    }

    if !LATITUDE_RANGE.contains(&lat) {
        return Err(Error::invalid_coordinate(
            lat,
            lon,
            format!("latitude should be in range [-90, 90], but {} was given", lat),
        ));
    }

    if !LONGITUDE_RANGE.contains(&lon) {
        return Err(Error::invalid_coordinate(
            lat,
            lon,
            format!(
                "longitude should be in range [-180, 180], but {} was given",
                lon
            ),
        ));
    }

    Ok(())
}

/// Validate a "top n" / "first n" count against the number of available items
///
/// Returns the count as a `usize` ready for slicing.
pub fn validate_bounded_count(n: i64, max_n: usize) -> Result<usize> {
    if n < 0 {
        return Err(Error::invalid_value(format!(
            "n should be a non-negative integer, got {}",
            n
        )));
    }

    let n = usize::try_from(n)
        .map_err(|_| Error::invalid_value(format!("n = {} does not fit this platform", n)))?;

    if n > max_n {
        return Err(Error::invalid_value(format!(
            "n = {} requested but there are only {} glaciers with relevant attributes",
            n, max_n
        )));
    }

    Ok(n)
}

/// Parse an untyped count argument
///
/// Fails with [`Error::InvalidType`] when `raw` is not an integer. Bounds are
/// left to [`validate_bounded_count`]; this only establishes the type. The
/// signature fits clap's `value_parser`.
pub fn parse_count(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::invalid_type(format!("n should be an integer, not '{}'", raw)))
}

/// Validate that a path value can name a file
///
/// The `&Path` parameter already rules out unchecked strings; this rejects the
/// path values that still cannot be opened as a file: the empty path and paths
/// without a final file-name component (`/`, `..`).
pub fn validate_path(path: &Path) -> Result<&Path> {
    if path.as_os_str().is_empty() {
        return Err(Error::invalid_type(
            "path should be a file path, got an empty path",
        ));
    }

    if path.file_name().is_none() {
        return Err(Error::invalid_type(format!(
            "path '{}' does not name a file",
            path.display()
        )));
    }

    Ok(path)
}
