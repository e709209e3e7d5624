//! Stats Service - CSV time-series aggregation engine
//!
//! Parses the wide-format (one column per date) COVID-19 time-series CSV
//! files, aggregates sub-region rows into per-country and global totals,
//! derives day-over-day deltas, and reshapes everything into the combined
//! summary the dashboard renders.
//!
//! Pipeline:
//! - `dataset` - load one CSV file into typed rows + detected date columns
//! - `aggregate` - per-date totals and the latest/delta/series view
//! - `catalog` - the country picker contents
//! - `service` - orchestrator: caches the three datasets and combines them

pub mod aggregate;
pub mod catalog;
pub mod dataset;
pub mod dates;
pub mod error;
pub mod service;

pub use error::{Result, StatsError};
pub use service::{CountrySummary, DataPaths, StatsService};
