//! # KPI Engine
//!
//! Derives the "after automation" KPIs for a scenario and its decisions.
//!
//! ## Derivation
//!
//! ```text
//! after[f] = clamp_f(baseline[f] + Σ adjustments[f])
//! avg_time = w × ai_time + (1 - w) × manual_time
//! ```
//!
//! Where:
//! - f: one of the six bounded rate fields
//! - clamp_f: [0, 95] remediation, [0, 98] retry success, [0, 100] cost reduction
//! - w: mean of the two AI remediation rates, as a fraction
//!
//! The baseline scenario applies no adjustments.

pub mod adjustment;
pub mod comparison;
pub mod derivation;

pub use adjustment::{adjustments_for, Adjustment};
pub use comparison::{ComparisonRow, KpiComparison, MetricUnit};
pub use derivation::{blended_remediation_time, derive_kpis};

use kpisim_common::{Decisions, Kpis, Result, Scenario};
use tracing::{debug, instrument};

/// Engine bound to one set of baseline constants
#[derive(Debug, Clone)]
pub struct KpiEngine {
    baseline: Kpis,
}

impl Default for KpiEngine {
    fn default() -> Self {
        Self::new(Kpis::initial())
    }
}

impl KpiEngine {
    pub fn new(baseline: Kpis) -> Self {
        Self { baseline }
    }

    /// Create an engine from externally supplied constants, rejecting unusable ones
    pub fn with_validated(baseline: Kpis) -> Result<Self> {
        baseline.validate()?;
        Ok(Self::new(baseline))
    }

    pub fn baseline(&self) -> &Kpis {
        &self.baseline
    }

    /// Derive KPIs for the active scenario
    #[instrument(level = "debug", skip(self, decisions))]
    pub fn derive(&self, scenario: Scenario, decisions: &Decisions) -> Kpis {
        let kpis = derive_kpis(&self.baseline, scenario, decisions);
        debug!(%kpis, "derived KPIs");
        kpis
    }

    /// Adjustments the active scenario applies, before clamping
    pub fn adjustments(&self, scenario: Scenario, decisions: &Decisions) -> Vec<Adjustment> {
        adjustments_for(scenario, decisions)
    }

    /// Before/after comparison of the derived record
    pub fn compare(&self, scenario: Scenario, decisions: &Decisions) -> KpiComparison {
        KpiComparison::between(&self.derive(scenario, decisions))
    }
}
