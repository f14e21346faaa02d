//! Error types for the KPI simulator
//!
//! The derivation engine itself cannot fail. Errors only arise where free-form
//! input crosses into the closed types: string-keyed decisions, baseline files
//! and configuration.

use thiserror::Error;

/// Result type alias using KpiSimError
pub type Result<T> = std::result::Result<T, KpiSimError>;

/// Unified error type for simulator operations
#[derive(Debug, Error)]
pub enum KpiSimError {
    // Decision errors
    #[error("Decision error: {0}")]
    Decision(#[from] DecisionError),

    // Baseline errors
    #[error("Baseline error: {0}")]
    Baseline(#[from] BaselineError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors resolving a decision update against the closed decision vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Unknown decision field {field} for scenario {scenario}")]
    UnknownField { scenario: String, field: String },

    #[error("Decision field {field} belongs to {expected}, not {actual}")]
    FieldScenarioMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid value {value} for decision field {field}")]
    ValueMismatch { field: String, value: String },

    #[error("Decision field {0} is not a boolean and cannot be toggled")]
    NotAFlag(String),

    #[error("Scenario {0} has no decisions")]
    NoDecisions(String),
}

/// Baseline constants that cannot seed the engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BaselineError {
    #[error("{field} = {value} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: String },
}

impl From<serde_json::Error> for KpiSimError {
    fn from(err: serde_json::Error) -> Self {
        KpiSimError::Serialization(err.to_string())
    }
}

impl KpiSimError {
    /// Whether the error was caused by caller input rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(self, KpiSimError::Decision(_) | KpiSimError::Baseline(_))
    }
}
