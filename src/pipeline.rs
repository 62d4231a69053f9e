use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::color::PlotColors;
use crate::data::loader::load_csv;
use crate::data::model::ColumnSummary;
use crate::plot::histogram::{render_histogram, Histogram};
use crate::plot::scatter::{render_scatter, ScatterSeries};
use crate::settings::Settings;

/// Files written by a successful [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs {
    pub histogram: PathBuf,
    pub scatter: PathBuf,
    /// Records read from the input.
    pub rows: usize,
}

/// Load the input CSV, then write the `rho` histogram and the `|S|` vs
/// `rho` scatter plot.
///
/// Loading and column validation finish before the first file is written,
/// so a bad input leaves no output behind.
pub fn run(settings: &Settings) -> Result<Outputs> {
    let dataset = load_csv(&settings.input)?;
    log::info!(
        "Loaded {} records from {}",
        dataset.len(),
        settings.input.display()
    );

    let rho = dataset.rho();
    let size_s = dataset.size_s();

    if dataset.is_empty() {
        log::warn!("{} has no records; plots will be empty", settings.input.display());
    }

    let rho_summary = ColumnSummary::of(&rho);
    log::info!(
        "rho over {} rows: min {:.4}, max {:.4}, mean {:.4}",
        rho_summary.count,
        rho_summary.min,
        rho_summary.max,
        rho_summary.mean
    );
    log::debug!("|S|: {:?}", ColumnSummary::of(&size_s));
    if rho_summary.skipped > 0 {
        log::warn!("{} rows have no rho value", rho_summary.skipped);
    }

    let colors = PlotColors::from_series_hex(&settings.series_color)?;
    let histogram = Histogram::from_values(&rho, settings.bins)?;
    let series = ScatterSeries::from_columns(&size_s, &rho)?;
    if series.is_empty() {
        log::warn!("No complete (|S|, rho) pairs to plot");
    } else if series.skipped > 0 {
        log::warn!("{} rows left out of the scatter plot", series.skipped);
    }

    // Axis ranges are checked before anything is written.
    histogram.axis_range()?;
    series.axis_ranges()?;

    log::debug!("Histogram edges: {:?}", histogram.edges());
    render_histogram(
        &histogram,
        &settings.histogram_labels,
        &colors,
        settings.figure,
        &settings.histogram_output,
    )
    .with_context(|| format!("writing {}", settings.histogram_output.display()))?;
    log::info!(
        "Histogram of {} values in {} bins saved to {}",
        histogram.total(),
        histogram.bins(),
        settings.histogram_output.display()
    );

    render_scatter(
        &series,
        settings.marker_area_pt2,
        &settings.scatter_labels,
        &colors,
        settings.figure,
        &settings.scatter_output,
    )
    .with_context(|| format!("writing {}", settings.scatter_output.display()))?;
    log::info!(
        "Scatter plot of {} points saved to {}",
        series.len(),
        settings.scatter_output.display()
    );

    Ok(Outputs {
        histogram: settings.histogram_output.clone(),
        scatter: settings.scatter_output.clone(),
        rows: dataset.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const SAMPLE: &str = "\
sketch_S,|R|,|S|,|R_union_S|,|S_minus_R|,rho
a.hll,2150000,2010000,2600000,450000,0.223881
b.hll,2150000,1980000,2190000,40000,0.020202
c.hll,2150000,2230000,2500000,350000,0.156951
d.hll,2150000,1890000,2400000,250000,0.132275
";

    fn settings_in(dir: &Path, csv: &str) -> Settings {
        let input = dir.join("sketches.csv");
        fs::write(&input, csv).unwrap();
        Settings {
            input,
            histogram_output: dir.join("hist.png"),
            scatter_output: dir.join("scatter.png"),
            ..Settings::default()
        }
    }

    #[test]
    fn writes_both_plots_at_300_dpi() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path(), SAMPLE);

        let outputs = run(&settings).unwrap();
        assert_eq!(outputs.rows, 4);

        for path in [&outputs.histogram, &outputs.scatter] {
            assert!(fs::metadata(path).unwrap().len() > 0);
            let decoder = png::Decoder::new(fs::File::open(path).unwrap());
            let reader = decoder.read_info().unwrap();
            let info = reader.info();
            assert_eq!((info.width, info.height), (2400, 1500));
            let dims = info.pixel_dims.unwrap();
            assert_eq!((dims.xppu, dims.yppu), (11811, 11811));
        }
    }

    #[test]
    fn missing_column_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path(), "sketch_S,|S|\na.hll,10\n");

        let err = run(&settings).unwrap_err();
        assert!(format!("{err:#}").contains("'rho'"), "{err:#}");
        assert!(!settings.histogram_output.exists());
        assert!(!settings.scatter_output.exists());
    }

    #[test]
    fn unplottable_size_column_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path(), "|S|,rho\n-1e308,0.1\n1e308,0.2\n");

        let err = run(&settings).unwrap_err();
        assert!(format!("{err:#}").contains("too wide"), "{err:#}");
        assert!(!settings.histogram_output.exists());
        assert!(!settings.scatter_output.exists());
    }

    #[test]
    fn missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            input: dir.path().join("nope.csv"),
            histogram_output: dir.path().join("hist.png"),
            scatter_output: dir.path().join("scatter.png"),
            ..Settings::default()
        };

        assert!(run(&settings).is_err());
        assert!(!settings.histogram_output.exists());
        assert!(!settings.scatter_output.exists());
    }

    #[test]
    fn rerun_overwrites_with_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path(), SAMPLE);

        run(&settings).unwrap();
        let first = (
            fs::read(&settings.histogram_output).unwrap(),
            fs::read(&settings.scatter_output).unwrap(),
        );
        run(&settings).unwrap();
        let second = (
            fs::read(&settings.histogram_output).unwrap(),
            fs::read(&settings.scatter_output).unwrap(),
        );

        assert!(first == second);
    }
}
