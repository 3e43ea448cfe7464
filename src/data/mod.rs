//! Data layer: core types, ingestion, and the derived views.
//!
//! Architecture:
//! ```text
//!  .xls / .xlsx
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  decode first sheet → Vec<RawRow>, check required columns
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize  │  alias resolution + coercion → Vec<ProductionRecord>
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  records + facets (years, months, groups, machines)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐      ┌─────────┐
//!   │  filter   │ ──▶ │  stats   │  total, avg max, global max, per-product max
//!   └──────────┘      └─────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  filtered view → CSV
//!   └──────────┘
//! ```
//! `suggest` works on the full dataset, independent of the filters.

pub mod export;
pub mod facets;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod stats;
pub mod suggest;
