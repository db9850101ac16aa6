//! Application constants for glacier analysis
//!
//! This module contains the physical constants, sheet column names, plot
//! labels and default values used throughout the crate.

// =============================================================================
// Geodesy
// =============================================================================

/// Mean Earth radius used by the haversine formula, in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Valid latitude range in decimal degrees
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in decimal degrees
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

// =============================================================================
// CSV Sheets
// =============================================================================

/// Extension every tabular input must carry
pub const CSV_EXTENSION: &str = "csv";

/// Column names of the WGMS glacier sheet (one row per glacier)
pub mod glacier_columns {
    pub const POLITICAL_UNIT: &str = "POLITICAL_UNIT";
    pub const NAME: &str = "NAME";
    pub const WGMS_ID: &str = "WGMS_ID";
    pub const LATITUDE: &str = "LATITUDE";
    pub const LONGITUDE: &str = "LONGITUDE";
    pub const PRIM_CLASSIFIC: &str = "PRIM_CLASSIFIC";
    pub const FORM: &str = "FORM";
    pub const FRONTAL_CHARS: &str = "FRONTAL_CHARS";

    /// Columns the loader cannot do without
    pub const REQUIRED: &[&str] = &[
        POLITICAL_UNIT,
        NAME,
        WGMS_ID,
        LATITUDE,
        LONGITUDE,
        PRIM_CLASSIFIC,
        FORM,
        FRONTAL_CHARS,
    ];
}

/// Column names of the WGMS mass-balance sheet (one row per glacier-year)
pub mod mass_balance_columns {
    pub const WGMS_ID: &str = "WGMS_ID";
    pub const YEAR: &str = "YEAR";
    pub const ANNUAL_BALANCE: &str = "ANNUAL_BALANCE";

    pub const REQUIRED: &[&str] = &[WGMS_ID, YEAR, ANNUAL_BALANCE];
}

// =============================================================================
// Code Search
// =============================================================================

/// Largest number of digit positions a wildcard pattern may pin
pub const MAX_WILDCARD_DIGITS: usize = 2;

// =============================================================================
// Plotting
// =============================================================================

/// Axis and title text for mass-balance charts
pub mod plot_labels {
    pub const X_AXIS: &str = "Year";
    pub const Y_AXIS: &str = "Mass Balance [mm.w.e]";
    pub const TITLE_SUFFIX: &str = "Mass Balance Measurements";
    pub const SUBTITLE: &str = "Vs Years";
}

/// Output extensions routed to the SVG backend
pub const SVG_EXTENSIONS: &[&str] = &["svg"];

/// Output extensions routed to the bitmap backend
pub const BITMAP_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Default chart size in pixels
pub const DEFAULT_PLOT_WIDTH: u32 = 800;
pub const DEFAULT_PLOT_HEIGHT: u32 = 600;

/// Default marker half-size in pixels
pub const DEFAULT_MARKER_SIZE: u32 = 4;

/// Default dash and gap length for the connecting line, in pixels
pub const DEFAULT_DASH_LENGTH: u32 = 6;
pub const DEFAULT_DASH_SPACING: u32 = 4;

// =============================================================================
// Configuration
// =============================================================================

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "glacier-analysis";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default log level when no verbosity flags are given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Default number of glaciers reported by `nearest`
pub const DEFAULT_NEAREST_COUNT: i64 = 5;
