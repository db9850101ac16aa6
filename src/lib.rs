//! Glacier Analysis Library
//!
//! A Rust library for working with WGMS (World Glacier Monitoring Service)
//! glacier records.
//!
//! This library provides tools for:
//! - Great-circle distances between glacier locations (haversine)
//! - Checking that CSV sheets carry the columns downstream code expects
//! - Looking up glaciers by full or partial (wildcard) classification code
//! - Rendering mass-balance time series to PNG or SVG charts
//! - Loading glacier and mass-balance sheets into an ordered collection

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod code_search;
        pub mod geo_distance;
        pub mod plot_emitter;
        pub mod schema_checker;
        pub mod sheet_loader;
        pub mod validation;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    CodePattern, CodedRecord, Coordinate, Glacier, GlacierCode, GlacierCollection,
    MassBalanceSeries,
};
pub use app::services::code_search::search_by_code;
pub use app::services::geo_distance::distance;
pub use app::services::plot_emitter::emit_mass_balance_plot;
pub use app::services::schema_checker::check_schema;
pub use config::Config;

/// Result type alias for glacier analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for glacier analysis operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Latitude or longitude outside its valid range, or not a finite number
    #[error("Invalid coordinate ({latitude}, {longitude}): {message}")]
    InvalidCoordinate {
        latitude: f64,
        longitude: f64,
        message: String,
    },

    /// Argument has the wrong shape for the operation
    #[error("Invalid type: {message}")]
    InvalidType { message: String },

    /// Argument is outside an allowed bound
    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    /// File does not have the expected extension
    #[error("Invalid file format for '{path}': expected a .{expected} file")]
    InvalidFormat { path: String, expected: String },

    /// CSV header lacks a required column
    #[error("CSV file '{path}' is missing column '{column}'")]
    MissingColumn { column: String, path: String },

    /// Malformed arguments to the code search engine
    #[error("Invalid search argument: {message}")]
    InvalidArgument { message: String },

    /// No glacier with the requested WGMS id
    #[error("Glacier not found: WGMS_ID = {id}")]
    UnknownGlacier { id: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Chart could not be drawn or written
    #[error("Failed to render plot to '{path}': {message}")]
    RenderFailure { path: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an invalid coordinate error
    pub fn invalid_coordinate(latitude: f64, longitude: f64, message: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            latitude,
            longitude,
            message: message.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(message: impl Into<String>) -> Self {
        Self::InvalidType {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            expected: expected.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            path: path.into(),
        }
    }

    /// Create an invalid search argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unknown glacier error
    pub fn unknown_glacier(id: impl Into<String>) -> Self {
        Self::UnknownGlacier { id: id.into() }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a render failure error
    pub fn render_failure(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Configuration {
            message: format!("JSON parsing failed: {}", error),
        }
    }
}
