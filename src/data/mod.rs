/// Data layer: core types, loading, filtering, and derivation.
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
///   │  Dataset  │  Vec<Row>, column index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  per-segment value sets → surviving row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  group by (segment, x), mean metric → DerivedDataset
///   └──────────┘
/// ```

pub mod derive;
pub mod filter;
pub mod loader;
pub mod model;
