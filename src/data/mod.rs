/// Data layer: core types, loading, filtering, aggregation and shaping.
///
/// Architecture:
/// ```text
///  volcanoes.csv (title line + header, UTF-8 or Latin-1)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode, clean, drop incomplete rows → VolcanoDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → FilteredView (record indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  summary stats, top-N, type frequency
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ present   │  table rows, CSV, map points, chart inputs
///   └──────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod present;
