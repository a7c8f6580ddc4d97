/// Data layer: table model, loading, summaries and cleaning.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Table (per-column type inference)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Column>, uniform row count
///   └──────────┘
///     │      │
///     ▼      ▼
///   ┌─────────┐ ┌──────────┐
///   │ summary  │ │ cleaning  │  duplicates, missing values, column drops
///   └─────────┘ └──────────┘
/// ```

pub mod cleaning;
pub mod loader;
pub mod model;
pub mod summary;
