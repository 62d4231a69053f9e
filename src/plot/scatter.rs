use std::f64::consts::PI;
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
// Points
// ---------------------------------------------------------------------------

/// Row-aligned `(x, y)` points, one per record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterSeries {
    pub points: Vec<(f64, f64)>,
    /// Rows dropped because either coordinate was missing.
    pub skipped: usize,
}

impl ScatterSeries {
    /// Pair `xs[i]` with `ys[i]` for every row.
    ///
    /// Duplicated points are kept. Rows with a non-finite coordinate are
    /// skipped and counted in [`ScatterSeries::skipped`].
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(PlotError::InvalidData(format!(
                "scatter columns differ in length: {} x values, {} y values",
                xs.len(),
                ys.len()
            )));
        }

        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| (x, y))
            .collect();
        let skipped = xs.len() - points.len();

        Ok(ScatterSeries { points, skipped })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Padded x and y axis ranges covering every point.
    pub fn axis_ranges(&self) -> Result<(std::ops::Range<f64>, std::ops::Range<f64>)> {
        let (x_lo, x_hi) =
            finite_bounds(self.points.iter().map(|p| p.0)).unwrap_or((f64::NAN, f64::NAN));
        let (y_lo, y_hi) =
            finite_bounds(self.points.iter().map(|p| p.1)).unwrap_or((f64::NAN, f64::NAN));
        Ok((
            padded_range(x_lo, x_hi, AXIS_MARGIN)?,
            padded_range(y_lo, y_hi, AXIS_MARGIN)?,
        ))
    }
}

/// Marker radius in pixels for a marker area given in points squared.
pub fn marker_radius_px(area_pt2: f64, figure: &Figure) -> u32 {
    let radius_pt = (area_pt2 / PI).sqrt();
    (figure.points_to_px(radius_pt).round() as u32).max(1)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render one filled circle per point and write the chart to `output_path`.
pub fn render_scatter(
    series: &ScatterSeries,
    marker_area_pt2: f64,
    labels: &ChartLabels,
    colors: &PlotColors,
    figure: Figure,
    output_path: &Path,
) -> Result<()> {
    let mut canvas = Canvas::new(figure);
    canvas.draw(|root| draw_scatter(root, series, marker_area_pt2, labels, colors, &figure))?;
    canvas.save_png(output_path)
}

fn draw_scatter(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    series: &ScatterSeries,
    marker_area_pt2: f64,
    labels: &ChartLabels,
    colors: &PlotColors,
    figure: &Figure,
) -> Result<()> {
    let (x_range, y_range) = series.axis_ranges()?;
    log::debug!("Scatter axes: x {x_range:?}, y {y_range:?}");

    let label_px = figure.font_px(LABEL_PT);
    let mut chart = ChartBuilder::on(root)
        .caption(&labels.title, figure.font(TITLE_PT))
        .margin(label_px)
        .x_label_area_size(label_px * 3)
        .y_label_area_size(label_px * 4)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let x_decimals = tick_decimals(x_range.end - x_range.start);
    let y_decimals = tick_decimals(y_range.end - y_range.start);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&labels.x)
        .y_desc(&labels.y)
        .label_style(figure.font(LABEL_PT))
        .axis_desc_style(figure.font(LABEL_PT))
        .x_label_formatter(&|x| format!("{x:.x_decimals$}"))
        .y_label_formatter(&|y| format!("{y:.y_decimals$}"))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let radius = marker_radius_px(marker_area_pt2, figure);
    chart
        .draw_series(
            series
                .points
                .iter()
                .map(|&point| Circle::new(point, radius, colors.series.filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_point_per_row_without_deduplication() {
        let xs = [1000.0, 1000.0, 2500.0, 4000.0];
        let ys = [0.1, 0.1, 0.3, 0.05];
        let series = ScatterSeries::from_columns(&xs, &ys).unwrap();

        assert_eq!(series.len(), 4);
        assert_eq!(series.skipped, 0);
        assert_eq!(
            series.points,
            [(1000.0, 0.1), (1000.0, 0.1), (2500.0, 0.3), (4000.0, 0.05)]
        );
    }

    #[test]
    fn rows_with_missing_coordinates_are_skipped() {
        let series =
            ScatterSeries::from_columns(&[1.0, f64::NAN, 3.0], &[0.1, 0.2, f64::NAN]).unwrap();
        assert_eq!(series.points, [(1.0, 0.1)]);
        assert_eq!(series.skipped, 2);
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        assert!(matches!(
            ScatterSeries::from_columns(&[1.0, 2.0], &[0.1]),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn axis_ranges_cover_points_with_margin() {
        let series = ScatterSeries::from_columns(&[0.0, 100.0], &[0.0, 1.0]).unwrap();
        let (x, y) = series.axis_ranges().unwrap();
        assert!((x.start + 5.0).abs() < 1e-9 && (x.end - 105.0).abs() < 1e-9);
        assert!((y.start + 0.05).abs() < 1e-9 && (y.end - 1.05).abs() < 1e-9);
    }

    #[test]
    fn empty_series_still_has_axes() {
        let series = ScatterSeries::from_columns(&[], &[]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.axis_ranges().unwrap(), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn overflowing_size_span_fails_instead_of_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.png");
        let series = ScatterSeries::from_columns(&[-1e308, 1e308], &[0.1, 0.2]).unwrap();
        assert!(matches!(series.axis_ranges(), Err(PlotError::InvalidData(_))));

        let figure = Figure {
            width_in: 1.0,
            height_in: 1.0,
            dpi: 50,
        };
        let colors = PlotColors::from_series_hex("#1f77b4").unwrap();
        let err = render_scatter(
            &series,
            10.0,
            &ChartLabels::new("scatter", "|S|", "rho"),
            &colors,
            figure,
            &path,
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
        assert!(!path.exists());
    }

    #[test]
    fn marker_of_ten_square_points_at_300_dpi() {
        let figure = Figure {
            width_in: 8.0,
            height_in: 5.0,
            dpi: 300,
        };
        // sqrt(10 / pi) = 1.784 pt = 7.43 px
        assert_eq!(marker_radius_px(10.0, &figure), 7);
    }

    #[test]
    fn renders_a_png_at_the_figure_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.png");
        let figure = Figure {
            width_in: 4.0,
            height_in: 2.5,
            dpi: 100,
        };
        let series =
            ScatterSeries::from_columns(&[1.9e6, 2.0e6, 2.2e6], &[0.02, 0.22, 0.11]).unwrap();
        let colors = PlotColors::from_series_hex("#1f77b4").unwrap();

        render_scatter(
            &series,
            10.0,
            &ChartLabels::new("scatter", "|S|", "rho"),
            &colors,
            figure,
            &path,
        )
        .unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (400, 250));
    }
}
