/// Data layer: core types, loading, and sample generation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, column index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  location estimates, weighted mean
///   └──────────┘
/// ```
///
/// `sample` goes the other way: it generates a synthetic state table and
/// writes it as CSV or Parquet.

pub mod loader;
pub mod model;
pub mod sample;
