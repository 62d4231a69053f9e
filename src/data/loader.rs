use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{SketchDataset, SketchRecord};

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 2] = ["rho", "|S|"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a sketch comparison CSV from disk.
///
/// Fails if the file cannot be opened, a required column is missing, or a
/// row holds a value that is not a number. The file handle is closed before
/// this returns.
pub fn load_csv(path: &Path) -> Result<SketchDataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    load_reader(file).with_context(|| format!("loading {}", path.display()))
}

/// Load a sketch comparison CSV from any reader.
///
/// CSV layout: header row with column names, one comparison per row.
/// Only `rho` and `|S|` are required; unknown columns are ignored.
/// Empty cells are read as missing values. Cells are trimmed, header names
/// are matched exactly as written.
pub fn load_reader<R: Read>(input: R) -> Result<SketchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(input);

    let column_names: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !column_names.iter().any(|h| h == required) {
            anyhow::bail!("CSV missing '{required}' column (found {column_names:?})");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SketchRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        records.push(record);
    }

    log::debug!(
        "Parsed {} records with columns {:?}",
        records.len(),
        column_names
    );

    Ok(SketchDataset::new(records, column_names))
}
