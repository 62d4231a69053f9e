use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SketchRecord – one row of the comparison CSV
// ---------------------------------------------------------------------------

/// One comparison of a genome sketch `S` against the reference catalogue `R`.
///
/// Header names follow the CSV written by the comparison step:
/// `sketch_S,|R|,|S|,|R_union_S|,|S_minus_R|,rho`.
/// Empty cells deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchRecord {
    /// File name of the compared sketch.
    #[serde(rename = "sketch_S", default)]
    pub sketch: Option<String>,
    /// Estimated size of the reference catalogue.
    #[serde(rename = "|R|", default)]
    pub size_r: Option<f64>,
    /// Estimated size of the compared sketch.
    #[serde(rename = "|S|", default)]
    pub size_s: Option<f64>,
    #[serde(rename = "|R_union_S|", default)]
    pub size_union: Option<f64>,
    #[serde(rename = "|S_minus_R|", default)]
    pub size_s_minus_r: Option<f64>,
    /// Genomic novelty, `|S \ R| / |S|`.
    #[serde(default)]
    pub rho: Option<f64>,
}

// ---------------------------------------------------------------------------
// SketchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed CSV.
#[derive(Debug, Clone, Default)]
pub struct SketchDataset {
    /// All records (rows), in file order.
    pub records: Vec<SketchRecord>,
    /// Header row as read from the file.
    pub column_names: Vec<String>,
}

impl SketchDataset {
    pub fn new(records: Vec<SketchRecord>, column_names: Vec<String>) -> Self {
        SketchDataset {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `rho` column; missing cells become `NaN`.
    pub fn rho(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.rho.unwrap_or(f64::NAN))
            .collect()
    }

    /// The `|S|` column; missing cells become `NaN`.
    pub fn size_s(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.size_s.unwrap_or(f64::NAN))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ColumnSummary – min / max / mean over the finite values of a column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    /// Number of finite values.
    pub count: usize,
    /// Number of values skipped because they were missing or non-finite.
    pub skipped: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ColumnSummary {
    /// Summarise a column. `min`, `max` and `mean` are `NaN` when no value is finite.
    pub fn of(values: &[f64]) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values.iter().filter(|v| v.is_finite()) {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return ColumnSummary {
                count,
                skipped: values.len(),
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
            };
        }

        ColumnSummary {
            count,
            skipped: values.len() - count,
            min,
            max,
            mean: sum / count as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(size_s: Option<f64>, rho: Option<f64>) -> SketchRecord {
        SketchRecord {
            sketch: None,
            size_r: None,
            size_s,
            size_union: None,
            size_s_minus_r: None,
            rho,
        }
    }

    #[test]
    fn columns_keep_row_order_and_mark_missing_cells() {
        let ds = SketchDataset::new(
            vec![
                record(Some(1000.0), Some(0.25)),
                record(None, Some(0.5)),
                record(Some(3000.0), None),
            ],
            vec!["|S|".into(), "rho".into()],
        );

        assert_eq!(ds.len(), 3);
        let rho = ds.rho();
        assert_eq!(rho[..2], [0.25, 0.5]);
        assert!(rho[2].is_nan());

        let size_s = ds.size_s();
        assert_eq!(size_s[0], 1000.0);
        assert!(size_s[1].is_nan());
        assert_eq!(size_s[2], 3000.0);
    }

    #[test]
    fn summary_ignores_non_finite_values() {
        let summary = ColumnSummary::of(&[0.2, f64::NAN, 0.6, f64::INFINITY, 0.1]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.min, 0.1);
        assert_eq!(summary.max, 0.6);
        assert!((summary.mean - 0.3).abs() < 1e-12);
    }

    #[test]
    fn summary_of_empty_column_is_nan() {
        let summary = ColumnSummary::of(&[]);
        assert_eq!(summary.count, 0);
        assert!(summary.min.is_nan() && summary.max.is_nan() && summary.mean.is_nan());
    }
}
