use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::canvas::Canvas;
use super::{
    finite_bounds, padded_range, tick_decimals, ChartLabels, Figure, PlotError, Result,
    AXIS_MARGIN, LABEL_PT, TITLE_PT,
};
use crate::color::PlotColors;

// ---------------------------------------------------------------------------
// Binning
// ---------------------------------------------------------------------------

/// Equal-width histogram over the observed range of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub min: f64,
    /// Right edge of the last bin.
    pub max: f64,
    /// Count per bin, left to right.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin the finite values of `values` into `bins` equal-width bins
    /// spanning their min–max range.
    ///
    /// Bins are half-open `[lo, hi)` except the last, which also holds the
    /// maximum. A single distinct value gets the range `[v - 0.5, v + 0.5]`;
    /// no finite values gives `[0, 1]` with every count zero.
    pub fn from_values(values: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(PlotError::InvalidData(
                "histogram needs at least one bin".to_string(),
            ));
        }

        let (min, max) = match finite_bounds(values.iter().copied()) {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(bounds) => bounds,
        };
        let span = max - min;
        if !span.is_finite() || span <= 0.0 {
            return Err(PlotError::InvalidData(format!(
                "cannot split {min}..{max} into {bins} bins"
            )));
        }

        let edges = bin_edges(min, max, bins);
        let width = span / bins as f64;
        let mut counts = vec![0u64; bins];
        for &v in values.iter().filter(|v| v.is_finite()) {
            counts[bin_index(v, min, width, &edges)] += 1;
        }

        Ok(Histogram { min, max, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins() as f64
    }

    /// Number of values counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `bins + 1` edges from `min` to `max`.
    pub fn edges(&self) -> Vec<f64> {
        bin_edges(self.min, self.max, self.bins())
    }

    /// Padded x axis range covering every bin.
    pub fn axis_range(&self) -> Result<std::ops::Range<f64>> {
        padded_range(self.min, self.max, AXIS_MARGIN)
    }

    /// `(left edge, right edge, count)` for every bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        let edges = self.edges();
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &count)| (edges[i], edges[i + 1], count))
    }
}

/// `bins + 1` equally spaced edges; the last one is exactly `max`.
fn bin_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let width = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| min + i as f64 * width).collect();
    if let Some(last) = edges.last_mut() {
        *last = max;
    }
    edges
}

/// Bin holding `v`, so that `edges[i] <= v < edges[i + 1]` (the last bin
/// also holds `max`).
///
/// The division can land one bin off when `v` sits on an edge, so the
/// estimate is corrected against the edges themselves.
fn bin_index(v: f64, min: f64, width: f64, edges: &[f64]) -> usize {
    let last = edges.len() - 2;
    let mut idx = (((v - min) / width) as usize).min(last);
    while idx > 0 && v < edges[idx] {
        idx -= 1;
    }
    while idx < last && v >= edges[idx + 1] {
        idx += 1;
    }
    idx
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `hist` as a bar chart and write it to `output_path`.
///
/// Bars are filled with the series colour and outlined with the edge
/// colour. The y axis starts at zero.
pub fn render_histogram(
    hist: &Histogram,
    labels: &ChartLabels,
    colors: &PlotColors,
    figure: Figure,
    output_path: &Path,
) -> Result<()> {
    let mut canvas = Canvas::new(figure);
    canvas.draw(|root| draw_histogram(root, hist, labels, colors, &figure))?;
    canvas.save_png(output_path)
}

fn draw_histogram(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    hist: &Histogram,
    labels: &ChartLabels,
    colors: &PlotColors,
    figure: &Figure,
) -> Result<()> {
    let x_range = hist.axis_range()?;
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1) as f64;
    let y_range = 0.0..peak * (1.0 + AXIS_MARGIN);
    log::debug!("Histogram axes: x {x_range:?}, y {y_range:?}");

    let label_px = figure.font_px(LABEL_PT);
    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, figure.font(TITLE_PT))
        .margin(label_px)
        .x_label_area_size(label_px * 3)
        .y_label_area_size(label_px * 4)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let x_decimals = tick_decimals(x_range.end - x_range.start);
    chart
        .configure_mesh()
        .max_light_lines(0)
        .bold_line_style(colors.grid.stroke_width(1))
        .x_desc(&labels.x)
        .y_desc(&labels.y)
        .label_style(figure.font(LABEL_PT))
        .axis_desc_style(figure.font(LABEL_PT))
        .x_label_formatter(&|x| format!("{x:.x_decimals$}"))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let edge_px = (figure.points_to_px(0.8).round() as u32).max(1);

    chart
        .draw_series(hist.bars().map(|(lo, hi, count)| {
            Rectangle::new([(lo, 0.0), (hi, count as f64)], colors.series.filled())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(hist.bars().map(|(lo, hi, count)| {
            Rectangle::new(
                [(lo, 0.0), (hi, count as f64)],
                colors.edge.stroke_width(edge_px),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
