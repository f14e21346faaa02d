//! Per-scenario adjustment tables
pub mod table;

pub use self::table::{adjustments_for, effects, Adjustment};
