/// Data layer: record types and CSV loading.
///
/// Architecture:
/// ```text
///   sketch comparison .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate header, parse rows → SketchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SketchDataset │  Vec<SketchRecord>, column accessors
///   └───────────────┘
/// ```

pub mod loader;
pub mod model;
