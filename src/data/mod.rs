/// Data layer: tally types, loading, and queries.
///
/// Architecture:
/// ```text
///   data/*.txt  ("label: count" lines)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse lines → Dataset per file
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ DatasetCollection │  datasets by name, LabelSet union
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query   │  per-label breakdown, two-dataset comparison
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod query;
