//! Aggregator
//!
//! Folds analyzed requests into per-statistic tables. Rows are corpora or
//! corpus groups plus a `Total` row; columns are years, months and a
//! `Total` column; every cell is split between home-country and other
//! clients.
//!
//! Aggregators built over disjoint parts of the input can be merged, and the
//! merge is commutative and associative.

mod aggregation;
mod analyze;
mod cell;
pub mod render;
mod report;
mod types;

#[cfg(test)]
mod tests;

pub use aggregation::{SkipCounts, StatsAggregator};
pub use analyze::{Analyzer, SkipReason, Usage};
pub use cell::StatCell;
pub use report::{CellValues, Report, ReportOptions, Row, Table, TotalPosition};
pub use types::{Column, Granularity, Period, RowKey, RowKind, Statistic};
