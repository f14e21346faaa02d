//! Before/after comparison for presentation
pub mod report;

pub use self::report::{ComparisonRow, KpiComparison, MetricUnit};
