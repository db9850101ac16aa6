//! CSV schema checks
//!
//! A gate run before a sheet is handed to downstream code: the file must be a
//! `.csv` and its header must carry every required column. Column order and
//! extra columns are not checked. Only the header row is inspected, so a
//! header-only file passes.

use super::validation::validate_path;
use crate::constants::CSV_EXTENSION;
use crate::{Error, Result};
use csv::{Reader, ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Open a CSV file for reading after path and extension checks
///
/// The extension comparison is case-sensitive: `data.CSV` is rejected.
pub fn open_csv(path: &Path) -> Result<Reader<File>> {
    let path = validate_path(path)?;

    if path.extension().and_then(|ext| ext.to_str()) != Some(CSV_EXTENSION) {
        return Err(Error::invalid_format(
            path.display().to_string(),
            CSV_EXTENSION,
        ));
    }

    let file = File::open(path)
        .map_err(|e| Error::io(format!("Failed to open '{}'", path.display()), e))?;

    Ok(ReaderBuilder::new().has_headers(true).from_reader(file))
}

/// Read the header row of an open CSV reader
pub fn read_header(reader: &mut Reader<File>, path: &Path) -> Result<StringRecord> {
    reader.headers().cloned().map_err(|e| {
        Error::csv_parsing(
            path.display().to_string(),
            "Failed to read header row",
            Some(e),
        )
    })
}

/// List the required columns absent from a CSV header, in the order given
pub fn missing_columns(path: &Path, required_columns: &[&str]) -> Result<Vec<String>> {
    let mut reader = open_csv(path)?;
    let header = read_header(&mut reader, path)?;

    debug!(
        "Header of {}: {:?}",
        path.display(),
        header.iter().collect::<Vec<_>>()
    );

    Ok(required_columns
        .iter()
        .filter(|column| !header.iter().any(|name| name == **column))
        .map(|column| column.to_string())
        .collect())
}

/// Check that a CSV file carries every required column
///
/// Fails with [`Error::InvalidType`] for unusable paths,
/// [`Error::InvalidFormat`] when the extension is not `csv`, and
/// [`Error::MissingColumn`] naming the first absent column.
pub fn check_schema(path: &Path, required_columns: &[&str]) -> Result<()> {
    match missing_columns(path, required_columns)?.into_iter().next() {
        Some(column) => Err(Error::missing_column(column, path.display().to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_check_schema_passes_with_required_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "balance.csv", "year,mass_balance\n2001,-120\n");

        assert!(check_schema(&path, &["year"]).is_ok());
        assert!(check_schema(&path, &["mass_balance", "year"]).is_ok());
        assert!(check_schema(&path, &[]).is_ok());
    }

    #[test]
    fn test_check_schema_names_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "balance.csv", "year,mass_balance\n2001,-120\n");

        match check_schema(&path, &["year", "elevation"]) {
            Err(Error::MissingColumn { column, .. }) => assert_eq!(column, "elevation"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_check_schema_header_only_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.csv", "year,mass_balance\n");

        assert!(check_schema(&path, &["year", "mass_balance"]).is_ok());
        assert!(matches!(
            check_schema(&path, &["elevation"]),
            Err(Error::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_check_schema_rejects_other_extensions() {
        let dir = TempDir::new().unwrap();
        let txt = write_file(&dir, "balance.txt", "year\n2001\n");
        let upper = write_file(&dir, "balance.CSV", "year\n2001\n");

        assert!(matches!(
            check_schema(&txt, &["year"]),
            Err(Error::InvalidFormat { .. })
        ));
        assert!(matches!(
            check_schema(&upper, &["year"]),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_check_schema_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");

        assert!(matches!(
            check_schema(&path, &["year"]),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_missing_columns_lists_all() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "sheet.csv", "NAME,WGMS_ID\nGRIES,359\n");

        let missing = missing_columns(&path, &["LATITUDE", "NAME", "LONGITUDE"]).unwrap();
        assert_eq!(missing, vec!["LATITUDE", "LONGITUDE"]);
    }
}
