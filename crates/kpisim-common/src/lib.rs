//! # KPI Simulator Common
//!
//! Shared types and errors for the automation KPI simulator.
//!
//! ## Core Types
//!
//! - [`Kpis`]: before/after automation indicators, with [`KpiField`] naming the bounded ones
//! - [`Scenario`]: the four strategic branches a user can pick
//! - [`Decisions`]: one decision record per non-baseline scenario
//! - [`DecisionField`]/[`DecisionValue`]: closed vocabulary for string-keyed updates

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{BaselineError, DecisionError, KpiSimError, Result};
pub use types::{
    decisions::{
        Aggressiveness, BalancedDecisions, Choice, ClassifierApproach, DecisionField,
        DecisionValue, Decisions, InvestmentSplit, MemoryFocusDecisions,
        UnclassifiedFocusDecisions,
    },
    kpis::{KpiField, Kpis},
    scenario::Scenario,
};

/// Simulator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound for automated remediation rates (%)
pub const MAX_REMEDIATION_RATE: f64 = 95.0;

/// Upper bound for retry success rates (%)
pub const MAX_SUCCESS_RATE: f64 = 98.0;

/// Upper bound for cost reductions (%)
pub const MAX_COST_REDUCTION: f64 = 100.0;

/// Maximum number of activity log entries kept
pub const MAX_LOG_ENTRIES: usize = 10;
