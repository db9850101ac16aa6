//! Command-line argument definitions for glacier analysis
//!
//! This module defines the CLI interface using the clap derive API. Each
//! subcommand maps onto one library operation.

use crate::app::services::validation::parse_count;
use crate::constants::DEFAULT_NEAREST_COUNT;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the glacier analysis toolkit
///
/// Works with WGMS glacier sheets: distances between points, CSV schema
/// checks, lookup by classification code, and mass-balance plots.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "glacier-analysis",
    version,
    about = "Analyse WGMS glacier records: distances, code search and mass-balance plots"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// JSON configuration file for plot and logging settings. If not specified,
    /// looks for ~/.config/glacier-analysis/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Only show errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Great-circle distance in km between two points
    Distance(DistanceArgs),
    /// Check that a CSV file has the required columns
    CheckCsv(CheckCsvArgs),
    /// Find glaciers by full or wildcard classification code
    Search(SearchArgs),
    /// List the glaciers closest to a point
    Nearest(NearestArgs),
    /// Plot a glacier's annual mass balance
    Plot(PlotArgs),
}

/// Arguments for the distance command
#[derive(Debug, Clone, Parser)]
#[command(allow_negative_numbers = true)]
pub struct DistanceArgs {
    /// Latitude of the first point in decimal degrees
    #[arg(value_name = "LAT1")]
    pub lat1: f64,

    /// Longitude of the first point in decimal degrees
    #[arg(value_name = "LON1")]
    pub lon1: f64,

    /// Latitude of the second point in decimal degrees
    #[arg(value_name = "LAT2")]
    pub lat2: f64,

    /// Longitude of the second point in decimal degrees
    #[arg(value_name = "LON2")]
    pub lon2: f64,
}

/// Arguments for the check-csv command
#[derive(Debug, Clone, Parser)]
pub struct CheckCsvArgs {
    /// CSV file to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Required columns (comma-separated list)
    #[arg(
        long = "columns",
        value_name = "LIST",
        help = "Comma-separated list of required column names"
    )]
    pub columns: ColumnList,
}

/// Arguments for the search command
#[derive(Debug, Clone, Parser)]
pub struct SearchArgs {
    /// WGMS glacier sheet (CSV)
    #[arg(short = 'g', long = "glaciers", value_name = "FILE")]
    pub glaciers: PathBuf,

    /// Code to look up
    ///
    /// With --full the whole code must match. Otherwise the digits in the
    /// pattern pin their positions and every other character is a
    /// placeholder, e.g. "6?8" or "??1".
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Require the full code to match
    #[arg(long = "full", help = "Match the full code instead of a wildcard pattern")]
    pub full: bool,

    /// Only print the first N matches
    #[arg(
        long = "first",
        value_name = "N",
        value_parser = parse_count,
        help = "Only print the first N matching glaciers"
    )]
    pub first: Option<i64>,
}

/// Arguments for the nearest command
#[derive(Debug, Clone, Parser)]
#[command(allow_negative_numbers = true)]
pub struct NearestArgs {
    /// WGMS glacier sheet (CSV)
    #[arg(short = 'g', long = "glaciers", value_name = "FILE")]
    pub glaciers: PathBuf,

    /// Latitude of the reference point
    #[arg(long = "lat", value_name = "DEGREES")]
    pub lat: f64,

    /// Longitude of the reference point
    #[arg(long = "lon", value_name = "DEGREES")]
    pub lon: f64,

    /// Number of glaciers to list
    #[arg(
        short = 'n',
        long = "count",
        value_name = "N",
        value_parser = parse_count,
        default_value_t = DEFAULT_NEAREST_COUNT
    )]
    pub count: i64,

    /// Print the ranked glaciers as JSON instead of a table
    #[arg(long = "json")]
    pub json: bool,
}

/// Arguments for the plot command
#[derive(Debug, Clone, Parser)]
pub struct PlotArgs {
    /// WGMS glacier sheet (CSV), used to look up the glacier name
    #[arg(short = 'g', long = "glaciers", value_name = "FILE")]
    pub glaciers: PathBuf,

    /// WGMS mass-balance sheet (CSV)
    #[arg(short = 'm', long = "mass-balance", value_name = "FILE")]
    pub mass_balance: PathBuf,

    /// WGMS id of the glacier to plot
    #[arg(long = "id", value_name = "WGMS_ID")]
    pub id: String,

    /// Output image (.svg, or .png/.jpg/.bmp when built with the `ttf` feature)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Chart width in pixels (overrides config)
    #[arg(long = "width", value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Chart height in pixels (overrides config)
    #[arg(long = "height", value_name = "PIXELS")]
    pub height: Option<u32>,
}

/// Comma-separated list of column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnList {
    pub columns: Vec<String>,
}

impl ColumnList {
    pub fn as_strs(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }
}

impl FromStr for ColumnList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let columns: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if columns.is_empty() {
            return Err(Error::invalid_value("At least one column name is required"));
        }

        Ok(Self { columns })
    }
}

impl Args {
    /// Validate arguments that clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(Commands::Plot(plot)) = &self.command {
            if plot.width == Some(0) || plot.height == Some(0) {
                return Err(Error::configuration("Plot size must be non-zero"));
            }
        }

        Ok(())
    }

    /// Log level requested by -v/-q, if any
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("info"),
                2 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_list_parsing() {
        let result = ColumnList::from_str("year").unwrap();
        assert_eq!(result.columns, vec!["year"]);

        let result = ColumnList::from_str(" year , mass_balance ").unwrap();
        assert_eq!(result.as_strs(), vec!["year", "mass_balance"]);

        assert!(ColumnList::from_str("").is_err());
        assert!(ColumnList::from_str(",,,").is_err());
    }

    #[test]
    fn test_distance_accepts_negative_coordinates() {
        let args =
            Args::try_parse_from(["glacier-analysis", "distance", "-30.16", "-69.81", "46.44", "8.34"])
                .unwrap();

        match args.command {
            Some(Commands::Distance(d)) => {
                assert_eq!(d.lat1, -30.16);
                assert_eq!(d.lon1, -69.81);
                assert_eq!(d.lon2, 8.34);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_search_args() {
        let args = Args::try_parse_from([
            "glacier-analysis",
            "search",
            "--glaciers",
            "sheet-A.csv",
            "6?8",
            "--first",
            "3",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Search(s)) => {
                assert_eq!(s.pattern, "6?8");
                assert!(!s.full);
                assert_eq!(s.first, Some(3));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_count_must_be_integer() {
        let result = Args::try_parse_from([
            "glacier-analysis",
            "nearest",
            "-g",
            "sheet-A.csv",
            "--lat",
            "46.5",
            "--lon",
            "8.0",
            "-n",
            "two",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_nearest_default_count() {
        let args = Args::try_parse_from([
            "glacier-analysis",
            "nearest",
            "-g",
            "sheet-A.csv",
            "--lat",
            "-46.5",
            "--lon",
            "8.0",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Nearest(n)) => {
                assert_eq!(n.count, DEFAULT_NEAREST_COUNT);
                assert_eq!(n.lat, -46.5);
                assert!(!n.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_log_level() {
        let args = Args::try_parse_from(["glacier-analysis", "-vv"]).unwrap();
        assert_eq!(args.get_log_level(), Some("debug"));

        let args = Args::try_parse_from(["glacier-analysis", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), Some("error"));

        let args = Args::try_parse_from(["glacier-analysis"]).unwrap();
        assert_eq!(args.get_log_level(), None);

        assert!(Args::try_parse_from(["glacier-analysis", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_validate_plot_size() {
        let args = Args::try_parse_from([
            "glacier-analysis",
            "plot",
            "-g",
            "a.csv",
            "-m",
            "b.csv",
            "--id",
            "359",
            "-o",
            "out.png",
            "--width",
            "0",
        ])
        .unwrap();
        assert!(args.validate().is_err());
    }
}
