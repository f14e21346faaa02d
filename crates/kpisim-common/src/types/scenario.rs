//! Scenario - Strategic branch selecting the active decision set

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DecisionError;

/// One of the four fixed strategic scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Automation as shipped, no decisions apply
    #[default]
    Baseline,
    /// Invest in automated handling of memory failures
    MemoryFocus,
    /// Invest in classifying and retrying unclassified failures
    UnclassifiedFocus,
    /// Split the investment across both failure classes
    Balanced,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Baseline,
        Scenario::MemoryFocus,
        Scenario::UnclassifiedFocus,
        Scenario::Balanced,
    ];

    /// Wire tag
    pub fn key(&self) -> &'static str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::MemoryFocus => "memory_focus",
            Scenario::UnclassifiedFocus => "unclassified_focus",
            Scenario::Balanced => "balanced",
        }
    }

    /// Human-readable label used in the activity log
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Baseline => "Baseline",
            Scenario::MemoryFocus => "Memory Focus",
            Scenario::UnclassifiedFocus => "Unclassified Focus",
            Scenario::Balanced => "Balanced",
        }
    }

    /// Whether this scenario carries a decision record
    pub fn has_decisions(&self) -> bool {
        !matches!(self, Scenario::Baseline)
    }
}

impl FromStr for Scenario {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.key() == s)
            .ok_or_else(|| DecisionError::UnknownScenario(s.to_string()))
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
