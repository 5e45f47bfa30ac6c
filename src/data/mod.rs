/// Data layer: core types, loading, filtering, display and export.
///
/// Architecture:
/// ```text
///  NYC Open Data CSV / local copy
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  project, coerce, drop, title-case → InspectionTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ InspectionTable │  Vec<InspectionRecord>, distinct cuisines/grades
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Criteria → sorted, capped rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ display   │  labelled text table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  CSV bytes, category counts
///   └──────────┘
/// ```

pub mod display;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
