//! # KPI Simulator Store
//!
//! Holds the selected scenario and every scenario's decisions, and records a
//! human-readable entry for each mutation.
//!
//! ```text
//! mutate store → derive KPIs → snapshot { scenario, decisions, kpis, log }
//! ```
//!
//! The log keeps the 10 most recent entries, newest first.

pub mod log;
pub mod store;

pub use log::{ActivityLog, LogEntry};
pub use store::{DecisionStore, StoreSnapshot};
