/// Data layer: the whole pipeline from file to chart-ready tables.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LimitDataset (headers trimmed, limits as f64)
///   └──────────┘
///        │  cached by (path, mtime) in `cache`
///        ▼
///   ┌──────────────┐
///   │ LimitDataset  │  Vec<LimitRecord> + range()/center() derivations
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  base ∩ variable selection → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ aggregate   │  KPI extremes, per-variable means, range heatmap
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape   │  wide → long melt for the grouped bar chart
///   └──────────┘
/// ```
pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod reshape;
