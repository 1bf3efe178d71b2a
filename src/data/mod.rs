/// Data layer: column schema, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable (headers + cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<TeamSeason>, display columns, unique values
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState predicates → FilteredView
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;
