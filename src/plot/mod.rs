//! Static chart rendering.
//!
//! Charts are drawn with [`plotters`] into an in-memory RGB buffer
//! ([`canvas`]) and written as PNG files carrying their DPI.
//! [`histogram`] bins the `rho` column, [`scatter`] pairs `|S|` with `rho`.

pub mod canvas;
pub mod histogram;
pub mod scatter;

use std::ops::Range;

use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to encode PNG: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = core::result::Result<T, PlotError>;

/// Typographic points per inch.
const POINTS_PER_INCH: f64 = 72.0;

/// Font sizes in points, scaled to pixels by [`Figure::font_px`].
pub const TITLE_PT: f64 = 12.0;
pub const LABEL_PT: f64 = 10.0;

/// Fraction of the data span added on each side of an axis.
pub const AXIS_MARGIN: f64 = 0.05;

const FONT_FAMILY: &str = "sans-serif";

/// Title and axis descriptions of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabels {
    pub title: String,
    pub x: String,
    pub y: String,
}

impl ChartLabels {
    pub fn new(title: &str, x: &str, y: &str) -> Self {
        ChartLabels {
            title: title.to_string(),
            x: x.to_string(),
            y: y.to_string(),
        }
    }
}

/// Physical size and resolution of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Figure {
    /// Pixel dimensions of the rendered image.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Convert a length in typographic points to pixels at this DPI.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / POINTS_PER_INCH
    }

    /// Font size in pixels for a size given in points.
    pub fn font_px(&self, points: f64) -> u32 {
        self.points_to_px(points).round().max(1.0) as u32
    }

    /// `(family, pixel size)` for a font given in points.
    pub fn font(&self, points: f64) -> (&'static str, u32) {
        (FONT_FAMILY, self.font_px(points))
    }
}

/// Number of decimals that keeps tick labels distinct over `span`.
pub fn tick_decimals(span: f64) -> usize {
    if !span.is_finite() || span <= 0.0 || span >= 10.0 {
        return 0;
    }
    (1 - span.log10().floor() as i64).clamp(1, 6) as usize
}

/// Widen `[min, max]` by `margin` of its span on each side.
///
/// A zero-width range is widened so that a chart can still be built over
/// it; missing (non-finite) bounds give `0..1`. Fails when the padded range
/// does not fit in an `f64`.
pub fn padded_range(min: f64, max: f64, margin: f64) -> Result<Range<f64>> {
    if !min.is_finite() || !max.is_finite() {
        return Ok(0.0..1.0);
    }
    let span = max - min;
    let range = if span <= 0.0 {
        let half = if min == 0.0 { 0.5 } else { min.abs() * 0.05 };
        (min - half)..(max + half)
    } else {
        (min - span * margin)..(max + span * margin)
    };

    if !(range.end - range.start).is_finite() {
        return Err(PlotError::InvalidData(format!(
            "axis range {min}..{max} is too wide to plot"
        )));
    }
    Ok(range)
}

/// Minimum and maximum of the finite values, if any.
pub fn finite_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_by_five_inches_at_300_dpi() {
        let fig = Figure {
            width_in: 8.0,
            height_in: 5.0,
            dpi: 300,
        };
        assert_eq!(fig.pixel_size(), (2400, 1500));
        assert_eq!(fig.font_px(12.0), 50);
        assert!((fig.points_to_px(72.0) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn padded_range_adds_margin() {
        let r = padded_range(0.0, 10.0, 0.05).unwrap();
        assert!((r.start + 0.5).abs() < 1e-12);
        assert!((r.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn padded_range_widens_degenerate_span() {
        let r = padded_range(2.0, 2.0, 0.05).unwrap();
        assert!(r.start < 2.0 && r.end > 2.0);

        let r = padded_range(0.0, 0.0, 0.05).unwrap();
        assert_eq!(r, -0.5..0.5);

        assert_eq!(padded_range(f64::NAN, 1.0, 0.05).unwrap(), 0.0..1.0);
    }

    #[test]
    fn padded_range_rejects_overflowing_span() {
        assert!(matches!(
            padded_range(-1e308, 1e308, 0.05),
            Err(PlotError::InvalidData(_))
        ));
        // Finite span whose margin pushes the bounds past f64::MAX.
        assert!(matches!(
            padded_range(0.0, f64::MAX, 0.05),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn tick_decimals_follow_span() {
        assert_eq!(tick_decimals(2_000_000.0), 0);
        assert_eq!(tick_decimals(1.0), 1);
        assert_eq!(tick_decimals(0.2), 2);
        assert_eq!(tick_decimals(0.003), 4);
        assert_eq!(tick_decimals(0.0), 0);
    }

    #[test]
    fn finite_bounds_skips_nan() {
        assert_eq!(finite_bounds([3.0, f64::NAN, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(finite_bounds([f64::NAN]), None);
    }
}
