/// Data layer: core types, loading, and writing.
///
/// Architecture:
/// ```text
///  .csv / .dat / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PointSequence (band limit enforced)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ PointSequence  │  Vec<Point>, capacity
///   └───────────────┘
///        │  (continuum pipeline)
///        ▼
///   ┌──────────┐
///   │  writer   │  ContinuumRemovedSeries → .dat / .csv / .json
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod writer;
