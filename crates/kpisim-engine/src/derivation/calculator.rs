//! Derivation: baseline + adjustments, clamped, then the blended remediation time

use kpisim_common::{Decisions, KpiField, Kpis, Scenario};

use crate::adjustment::adjustments_for;

/// Derive the KPI record for a scenario and its decisions.
///
/// Pure: the same inputs always yield the same output. Steps:
/// 1. Start from the baseline "after" values
/// 2. Add every adjustment for the active scenario, in table order
/// 3. Clamp each bounded field into its range
/// 4. Recompute `avg_remediation_time_hours` from the clamped rates
pub fn derive_kpis(baseline: &Kpis, scenario: Scenario, decisions: &Decisions) -> Kpis {
    let mut kpis = baseline.clone();

    for adjustment in adjustments_for(scenario, decisions) {
        *kpis.get_mut(adjustment.field) += adjustment.delta;
    }

    for field in KpiField::ALL {
        let value = kpis.get_mut(field);
        *value = field.clamp(*value);
    }

    kpis.avg_remediation_time_hours = blended_remediation_time(&kpis);
    kpis
}

/// Average remediation time, weighting automated vs. manual handling.
///
/// The mean of the two AI remediation rates is the automated fraction `w`:
/// `w * ai_time + (1 - w) * manual_time`
///
/// Evaluated over the rate sum `s` as `(s * ai_time + (200 - s) * manual_time) / 200`
/// so whole-number rates never pass through an inexact fraction.
pub fn blended_remediation_time(kpis: &Kpis) -> f64 {
    let automated = kpis.ai_remediation_rate_memory + kpis.ai_remediation_rate_unclassified;
    (automated * kpis.ai_remediation_time_hours
        + (200.0 - automated) * kpis.avg_remediation_time_before_hours)
        / 200.0
}
