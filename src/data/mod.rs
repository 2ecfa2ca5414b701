/// Data layer: core types, loading, filtering, and export.
///
/// Architecture:
/// ```text
///  temperature_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse (timestamp, value) rows → Series
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  moving-average family → FilteredSeries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  aligned original/filtered CSV pair
///   └──────────┘
/// ```
///
/// Stages hand each other owned values (`Series`, `FilteredSeries`); no
/// stage mutates its input, so the original series survives for the
/// side-by-side comparison.

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
