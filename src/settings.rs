use std::path::PathBuf;

use crate::plot::{ChartLabels, Figure};

// ---------------------------------------------------------------------------
// Run settings
// ---------------------------------------------------------------------------

/// Everything the plotting run needs to know. The values are fixed; there is
/// no command line or config file.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Sketch comparison CSV to read.
    pub input: PathBuf,
    /// Where the `rho` histogram is written.
    pub histogram_output: PathBuf,
    /// Where the `|S|` vs `rho` scatter plot is written.
    pub scatter_output: PathBuf,

    /// Number of equal-width histogram bins.
    pub bins: usize,
    /// Scatter marker area in points squared.
    pub marker_area_pt2: f64,
    pub figure: Figure,
    /// Bar fill and marker colour, `#rrggbb`.
    pub series_color: String,

    pub histogram_labels: ChartLabels,
    pub scatter_labels: ChartLabels,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("resultados streptococcus/streptococcus7001.csv"),
            histogram_output: PathBuf::from("histograma_rho_streptococcus7001.png"),
            scatter_output: PathBuf::from("scatter_rho_streptococcus7001.png"),
            bins: 30,
            marker_area_pt2: 10.0,
            figure: Figure {
                width_in: 8.0,
                height_in: 5.0,
                dpi: 300,
            },
            series_color: "#1f77b4".to_string(),
            histogram_labels: ChartLabels::new(
                "Distribución de rho - Streptococcus",
                "rho (novedad genómica)",
                "Frecuencia",
            ),
            scatter_labels: ChartLabels::new(
                "Novedad vs tamaño del sketch - Streptococcus",
                "|S| (tamaño estimado del sketch)",
                "rho (novedad genómica)",
            ),
        }
    }
}
