//! Mass-balance chart rendering
//!
//! Each call builds its own [`MassBalanceFigure`] and drawing area, renders,
//! and drops them; no plotting state outlives a call. The output format is
//! chosen from the file extension: `svg` uses the SVG backend, `png`, `jpg`,
//! `jpeg` and `bmp` use the bitmap backend.
//!
//! The bitmap backend rasterises text itself and needs a font engine, so it
//! is only available when the crate is built with the `ttf` feature. Without
//! it bitmap extensions are rejected with [`Error::InvalidFormat`] before
//! anything is drawn.

use super::validation::validate_path;
use crate::config::PlotConfig;
use crate::constants::{BITMAP_EXTENSIONS, SVG_EXTENSIONS, plot_labels};
use crate::{Error, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

const MARKER_COLOR: RGBColor = BLUE;
const LINE_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Whether a font engine for bitmap text is compiled in
pub const BITMAP_OUTPUT_ENABLED: bool = cfg!(feature = "ttf");

/// Image backend selected from an output path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Bitmap,
}

impl OutputFormat {
    /// Pick the backend for `path`, failing with [`Error::InvalidFormat`]
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if SVG_EXTENSIONS.contains(&extension.as_str()) {
            Ok(Self::Svg)
        } else if BITMAP_EXTENSIONS.contains(&extension.as_str()) {
            if BITMAP_OUTPUT_ENABLED {
                Ok(Self::Bitmap)
            } else {
                Err(Error::invalid_format(
                    path.display().to_string(),
                    format!(
                        "{} (bitmap output needs the `ttf` feature)",
                        SVG_EXTENSIONS.join("/")
                    ),
                ))
            }
        } else {
            Err(Error::invalid_format(
                path.display().to_string(),
                format!("{} or {}", SVG_EXTENSIONS.join("/"), BITMAP_EXTENSIONS.join("/")),
            ))
        }
    }
}

/// One mass-balance chart, owned by a single render call
#[derive(Debug, Clone)]
pub struct MassBalanceFigure<'a> {
    title: String,
    years: &'a [i32],
    balances: &'a [f64],
    style: PlotConfig,
}

impl<'a> MassBalanceFigure<'a> {
    /// Create a figure for a glacier's series
    ///
    /// Fails with [`Error::InvalidValue`] for empty or mismatched series and
    /// for non-finite balances.
    pub fn new(
        glacier_name: &str,
        years: &'a [i32],
        balances: &'a [f64],
        style: &PlotConfig,
    ) -> Result<Self> {
        if years.is_empty() {
            return Err(Error::invalid_value(format!(
                "no mass-balance measurements to plot for {}",
                glacier_name
            )));
        }

        if years.len() != balances.len() {
            return Err(Error::invalid_value(format!(
                "{} years but {} mass-balance values",
                years.len(),
                balances.len()
            )));
        }

        if let Some(bad) = balances.iter().find(|b| !b.is_finite()) {
            return Err(Error::invalid_value(format!(
                "mass balance {} cannot be plotted",
                bad
            )));
        }

        Ok(Self {
            title: format!("{} {}", glacier_name, plot_labels::TITLE_SUFFIX),
            years,
            balances,
            style: style.clone(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Year axis with one year of padding either side
    fn x_range(&self) -> Range<i32> {
        let min = self.years.iter().copied().min().unwrap_or_default();
        let max = self.years.iter().copied().max().unwrap_or_default();
        (min - 1)..(max + 1)
    }

    /// Balance axis padded by a tenth of the spread
    fn y_range(&self) -> Range<f64> {
        let min = self.balances.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.balances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let pad = if max > min { (max - min) * 0.1 } else { 1.0 };
        (min - pad)..(max + pad)
    }

    fn points(&self) -> Vec<(i32, f64)> {
        self.years
            .iter()
            .copied()
            .zip(self.balances.iter().copied())
            .collect()
    }

    /// Render the chart to `output_path` and confirm the file exists
    pub fn save(&self, output_path: &Path) -> Result<()> {
        let output_path = validate_path(output_path)?;
        let size = (self.style.width, self.style.height);

        match OutputFormat::from_path(output_path)? {
            OutputFormat::Svg => {
                let root = SVGBackend::new(output_path, size).into_drawing_area();
                self.draw(&root, output_path)?;
            }
            OutputFormat::Bitmap => {
                let root = BitMapBackend::new(output_path, size).into_drawing_area();
                self.draw(&root, output_path)?;
            }
        }

        if !output_path.is_file() {
            return Err(Error::render_failure(
                output_path.display().to_string(),
                "output file was not created",
            ));
        }

        info!("Saved mass-balance plot to {}", output_path.display());
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, path: &Path) -> Result<()> {
        let points = self.points();
        debug!("Plotting {} points for '{}'", points.len(), self.title);

        root.fill(&WHITE).map_err(|e| render_error(path, e))?;
        let area = root
            .titled(&self.title, ("sans-serif", 20))
            .map_err(|e| render_error(path, e))?;

        let mut chart = ChartBuilder::on(&area)
            .caption(plot_labels::SUBTITLE, ("sans-serif", 16))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(self.x_range(), self.y_range())
            .map_err(|e| render_error(path, e))?;

        chart
            .configure_mesh()
            .x_desc(plot_labels::X_AXIS)
            .y_desc(plot_labels::Y_AXIS)
            .draw()
            .map_err(|e| render_error(path, e))?;

        chart
            .draw_series(DashedLineSeries::new(
                points.iter().copied(),
                self.style.dash_length,
                self.style.dash_spacing,
                LINE_COLOR.stroke_width(1),
            ))
            .map_err(|e| render_error(path, e))?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Cross::new(point, self.style.marker_size, MARKER_COLOR.stroke_width(2))),
            )
            .map_err(|e| render_error(path, e))?;

        root.present().map_err(|e| render_error(path, e))?;
        Ok(())
    }
}

fn render_error<E: std::error::Error + Send + Sync>(
    path: &Path,
    error: DrawingAreaErrorKind<E>,
) -> Error {
    Error::render_failure(path.display().to_string(), error.to_string())
}

/// Render a glacier's mass-balance series to `output_path`
///
/// Measurements are drawn as crosses joined by a dashed line, with "Year" on
/// the x-axis and "Mass Balance [mm.w.e]" on the y-axis. The caption is
/// "<name> Mass Balance Measurements" over a "Vs Years" line. Succeeds only if
/// the output file exists afterwards.
pub fn emit_mass_balance_plot(
    glacier_name: &str,
    years: &[i32],
    balances: &[f64],
    output_path: &Path,
    style: &PlotConfig,
) -> Result<()> {
    MassBalanceFigure::new(glacier_name, years, balances, style)?.save(output_path)
}
