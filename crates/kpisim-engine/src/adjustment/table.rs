//! Adjustment tables: decision value -> additive KPI deltas
//!
//! Each non-baseline scenario has its own table over its decision fields.
//! Flags contribute only when enabled; enum fields always contribute the row
//! for their current option (which may be empty).

use kpisim_common::{
    Aggressiveness, ClassifierApproach, DecisionField, DecisionValue, Decisions, InvestmentSplit,
    KpiField, Scenario,
};
use serde::{Deserialize, Serialize};

const REM_MEM: KpiField = KpiField::AiRemediationRateMemory;
const REM_UNCL: KpiField = KpiField::AiRemediationRateUnclassified;
const RETRY_MEM: KpiField = KpiField::AiRetrySuccessRateMemory;
const RETRY_UNCL: KpiField = KpiField::AiRetrySuccessRateUnclassified;
const COST: KpiField = KpiField::CostReduction;
const UNNECESSARY: KpiField = KpiField::UnnecessaryCostReduction;

type Effects = &'static [(KpiField, f64)];

const NONE: Effects = &[];

// memory_focus
const CONSERVATIVE: Effects = &[
    (REM_MEM, -5.0),
    (RETRY_MEM, -5.0),
    (COST, -2.0),
    (UNNECESSARY, -5.0),
];
const AGGRESSIVE: Effects = &[
    (REM_MEM, 10.0),
    (RETRY_MEM, 15.0),
    (COST, 5.0),
    (UNNECESSARY, 10.0),
];
const EXPERT_RULES: Effects = &[(REM_MEM, 3.0), (RETRY_MEM, 5.0)];
const EXPAND_COMPUTE: Effects = &[
    (REM_MEM, 2.0),
    (RETRY_MEM, 8.0),
    (COST, -6.0),
    (UNNECESSARY, -5.0),
];

// unclassified_focus
const RULE_BASED: Effects = &[(REM_UNCL, 4.0)];
const ML_CLUSTERING: Effects = &[(REM_UNCL, 12.0), (RETRY_UNCL, 6.0), (COST, 2.0)];
const HYBRID: Effects = &[(REM_UNCL, 8.0), (RETRY_UNCL, 10.0), (COST, -1.0)];
const AUTO_RETRY: Effects = &[(RETRY_UNCL, 12.0), (UNNECESSARY, -4.0)];
const HUMAN_REVIEW: Effects = &[(REM_UNCL, -6.0), (RETRY_UNCL, 4.0), (COST, -3.0)];

// balanced
const MEMORY_HEAVY: Effects = &[(REM_MEM, 6.0), (REM_UNCL, 1.0), (RETRY_MEM, 6.0)];
const EVEN: Effects = &[(REM_MEM, 4.0), (REM_UNCL, 4.0), (RETRY_MEM, 3.0), (RETRY_UNCL, 3.0)];
const UNCLASSIFIED_HEAVY: Effects = &[(REM_MEM, 1.0), (REM_UNCL, 6.0), (RETRY_UNCL, 6.0)];
const RIGHT_SIZING: Effects = &[
    (REM_MEM, 2.0),
    (REM_UNCL, 2.0),
    (COST, 8.0),
    (UNNECESSARY, 15.0),
];

/// Deltas contributed by one decision field holding one value
pub fn effects(field: DecisionField, value: DecisionValue) -> Effects {
    match (field, value) {
        (DecisionField::TuneModelAggressiveness, DecisionValue::Aggressiveness(level)) => {
            match level {
                Aggressiveness::Conservative => CONSERVATIVE,
                Aggressiveness::Moderate => NONE,
                Aggressiveness::Aggressive => AGGRESSIVE,
            }
        }
        (DecisionField::InvestInExpertRules, DecisionValue::Flag(true)) => EXPERT_RULES,
        (DecisionField::ExpandComputeResources, DecisionValue::Flag(true)) => EXPAND_COMPUTE,

        (DecisionField::ClassifierApproach, DecisionValue::Classifier(approach)) => match approach {
            ClassifierApproach::RuleBased => RULE_BASED,
            ClassifierApproach::MlClustering => ML_CLUSTERING,
            ClassifierApproach::Hybrid => HYBRID,
        },
        (DecisionField::EnableAutoRetry, DecisionValue::Flag(true)) => AUTO_RETRY,
        (DecisionField::RequireHumanReview, DecisionValue::Flag(true)) => HUMAN_REVIEW,

        (DecisionField::InvestmentSplit, DecisionValue::Split(split)) => match split {
            InvestmentSplit::MemoryHeavy => MEMORY_HEAVY,
            InvestmentSplit::Even => EVEN,
            InvestmentSplit::UnclassifiedHeavy => UNCLASSIFIED_HEAVY,
        },
        (DecisionField::EnableRightSizing, DecisionValue::Flag(true)) => RIGHT_SIZING,

        _ => NONE,
    }
}

/// A single additive change applied to a bounded KPI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// KPI being moved
    pub field: KpiField,
    /// Signed percentage points
    pub delta: f64,
    /// Decision field responsible
    pub decision: DecisionField,
    /// Value the decision held
    pub value: DecisionValue,
}

impl Adjustment {
    /// Human-readable explanation, e.g.
    /// "Tune model aggressiveness = Aggressive: Memory remediation rate +10"
    pub fn description(&self) -> String {
        format!(
            "{} = {}: {} {:+}",
            self.decision.label(),
            self.value.label(),
            self.field.label(),
            self.delta
        )
    }
}

/// Ordered adjustments for the active scenario.
///
/// Order follows the scenario's record fields, then each row's KPI order.
/// The baseline scenario yields nothing.
pub fn adjustments_for(scenario: Scenario, decisions: &Decisions) -> Vec<Adjustment> {
    DecisionField::for_scenario(scenario)
        .flat_map(|decision| {
            let value = decisions.value(decision);
            effects(decision, value)
                .iter()
                .map(move |&(field, delta)| Adjustment {
                    field,
                    delta,
                    decision,
                    value,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(adjustments: &[Adjustment], field: KpiField) -> f64 {
        adjustments
            .iter()
            .filter(|a| a.field == field)
            .map(|a| a.delta)
            .sum()
    }

    #[test]
    fn test_baseline_has_no_adjustments() {
        assert!(adjustments_for(Scenario::Baseline, &Decisions::default()).is_empty());
    }

    #[test]
    fn test_default_memory_focus_is_neutral() {
        // Moderate aggressiveness with both flags off
        assert!(adjustments_for(Scenario::MemoryFocus, &Decisions::default()).is_empty());
    }

    #[test]
    fn test_aggressive_row() {
        let mut decisions = Decisions::default();
        decisions.memory_focus.tune_model_aggressiveness = Aggressiveness::Aggressive;

        let adjustments = adjustments_for(Scenario::MemoryFocus, &decisions);
        assert_eq!(total(&adjustments, REM_MEM), 10.0);
        assert_eq!(total(&adjustments, RETRY_MEM), 15.0);
        assert_eq!(total(&adjustments, COST), 5.0);
        assert_eq!(total(&adjustments, UNNECESSARY), 10.0);
    }

    #[test]
    fn test_only_active_scenario_contributes() {
        let mut decisions = Decisions::default();
        decisions.memory_focus.invest_in_expert_rules = true;
        decisions.balanced.enable_right_sizing = true;

        let adjustments = adjustments_for(Scenario::UnclassifiedFocus, &decisions);
        assert!(adjustments
            .iter()
            .all(|a| a.decision.scenario() == Scenario::UnclassifiedFocus));
    }

    #[test]
    fn test_order_follows_record_fields() {
        let mut decisions = Decisions::default();
        decisions.unclassified_focus.enable_auto_retry = true;
        decisions.unclassified_focus.require_human_review = true;

        let order: Vec<_> = adjustments_for(Scenario::UnclassifiedFocus, &decisions)
            .into_iter()
            .map(|a| a.decision)
            .collect();
        assert_eq!(
            order,
            vec![
                DecisionField::ClassifierApproach,
                DecisionField::EnableAutoRetry,
                DecisionField::EnableAutoRetry,
                DecisionField::RequireHumanReview,
                DecisionField::RequireHumanReview,
                DecisionField::RequireHumanReview,
            ]
        );
    }

    #[test]
    fn test_disabled_flags_contribute_nothing() {
        for field in DecisionField::ALL.iter().filter(|f| f.is_flag()) {
            assert!(effects(*field, DecisionValue::Flag(false)).is_empty());
        }
    }

    #[test]
    fn test_description() {
        let adjustment = Adjustment {
            field: REM_MEM,
            delta: 10.0,
            decision: DecisionField::TuneModelAggressiveness,
            value: Aggressiveness::Aggressive.into(),
        };
        assert_eq!(
            adjustment.description(),
            "Tune model aggressiveness = Aggressive: Memory remediation rate +10"
        );
    }
}
