//! Decision store: current scenario, per-scenario decisions and the activity log
//!
//! KPIs are never cached. Every read derives them from the store's baseline,
//! scenario and decisions, and every mutator returns a fresh [`StoreSnapshot`].

use kpisim_common::{
    DecisionError, DecisionField, DecisionValue, Decisions, KpiSimError, Kpis, Result, Scenario,
};
use kpisim_engine::{Adjustment, KpiComparison, KpiEngine};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::log::ActivityLog;

/// Immutable view of the store after an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub scenario: Scenario,
    pub decisions: Decisions,
    pub kpis: Kpis,
    /// Newest first, at most 10 entries
    pub log: Vec<String>,
}

/// Single in-process simulator state
#[derive(Debug, Clone)]
pub struct DecisionStore {
    engine: KpiEngine,
    initial_scenario: Scenario,
    scenario: Scenario,
    decisions: Decisions,
    log: ActivityLog,
}

impl Default for DecisionStore {
    fn default() -> Self {
        Self::new(KpiEngine::default())
    }
}

impl DecisionStore {
    /// Store on the baseline scenario with default decisions and an empty log
    pub fn new(engine: KpiEngine) -> Self {
        Self::with_scenario(engine, Scenario::Baseline)
    }

    /// Store starting on a given scenario; `reset` returns here
    pub fn with_scenario(engine: KpiEngine, scenario: Scenario) -> Self {
        Self {
            engine,
            initial_scenario: scenario,
            scenario,
            decisions: Decisions::default(),
            log: ActivityLog::new(),
        }
    }

    pub fn engine(&self) -> &KpiEngine {
        &self.engine
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn decisions(&self) -> &Decisions {
        &self.decisions
    }

    /// Current KPI snapshot, derived on read
    pub fn kpis(&self) -> Kpis {
        self.engine.derive(self.scenario, &self.decisions)
    }

    /// Adjustments currently in effect
    pub fn adjustments(&self) -> Vec<Adjustment> {
        self.engine.adjustments(self.scenario, &self.decisions)
    }

    /// Before/after comparison of the current KPIs
    pub fn comparison(&self) -> KpiComparison {
        self.engine.compare(self.scenario, &self.decisions)
    }

    /// Log messages, newest first
    pub fn log(&self) -> Vec<String> {
        self.log.messages()
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.log
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            scenario: self.scenario,
            decisions: self.decisions,
            kpis: self.kpis(),
            log: self.log(),
        }
    }

    /// Switch the active scenario
    pub fn set_scenario(&mut self, scenario: Scenario) -> StoreSnapshot {
        self.scenario = scenario;
        self.record(format!("Scenario changed to {}", scenario.label()));
        self.snapshot()
    }

    /// Replace one decision of a scenario.
    ///
    /// The scenario need not be active; its decisions are kept and take
    /// effect once it is selected.
    pub fn set_decision(
        &mut self,
        scenario: Scenario,
        field: DecisionField,
        value: DecisionValue,
    ) -> Result<StoreSnapshot> {
        Self::check_ownership(scenario, field)?;
        self.decisions.apply(field, value)?;

        let message = match value {
            DecisionValue::Flag(_) => {
                format!("{}: {} {}", scenario.label(), field.label(), value.label())
            }
            _ => format!(
                "{}: {} set to {}",
                scenario.label(),
                field.label(),
                value.label()
            ),
        };
        self.record(message);
        Ok(self.snapshot())
    }

    /// Flip a boolean decision
    pub fn toggle_decision(&mut self, scenario: Scenario, field: DecisionField) -> Result<StoreSnapshot> {
        Self::check_ownership(scenario, field)?;
        let enabled = self.decisions.toggle(field)?;

        self.record(format!(
            "{}: {} {}",
            scenario.label(),
            field.label(),
            DecisionValue::Flag(enabled).label()
        ));
        Ok(self.snapshot())
    }

    /// String-keyed update used by the presentation boundary
    pub fn set_decision_by_key(
        &mut self,
        scenario_key: &str,
        field_key: &str,
        value: &serde_json::Value,
    ) -> Result<StoreSnapshot> {
        let scenario: Scenario = scenario_key.parse()?;
        let field = DecisionField::lookup(scenario, field_key)?;
        let value = DecisionValue::from_json(field, value)?;
        self.set_decision(scenario, field, value)
    }

    /// String-keyed toggle used by the presentation boundary
    pub fn toggle_decision_by_key(&mut self, scenario_key: &str, field_key: &str) -> Result<StoreSnapshot> {
        let scenario: Scenario = scenario_key.parse()?;
        let field = DecisionField::lookup(scenario, field_key)?;
        self.toggle_decision(scenario, field)
    }

    /// Restore the starting scenario and default decisions. The log is kept.
    pub fn reset(&mut self) -> StoreSnapshot {
        self.scenario = self.initial_scenario;
        self.decisions = Decisions::default();
        self.record("Simulation reset".to_string());
        self.snapshot()
    }

    fn check_ownership(scenario: Scenario, field: DecisionField) -> Result<()> {
        if !scenario.has_decisions() {
            return Err(DecisionError::NoDecisions(scenario.key().to_string()).into());
        }
        if field.scenario() != scenario {
            return Err(KpiSimError::Decision(DecisionError::FieldScenarioMismatch {
                field: field.key().to_string(),
                expected: field.scenario().key().to_string(),
                actual: scenario.key().to_string(),
            }));
        }
        Ok(())
    }

    fn record(&mut self, message: String) {
        info!(scenario = self.scenario.key(), "{}", message);
        self.log.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpisim_common::{Aggressiveness, ClassifierApproach};
    use serde_json::json;

    #[test]
    fn test_starts_on_baseline() {
        let store = DecisionStore::default();
        assert_eq!(store.scenario(), Scenario::Baseline);
        assert!(store.log().is_empty());
        assert_eq!(store.kpis().ai_remediation_rate_memory, 56.0);
    }

    #[test]
    fn test_set_scenario_logs_and_recomputes() {
        let mut store = DecisionStore::default();
        store
            .set_decision(
                Scenario::MemoryFocus,
                DecisionField::TuneModelAggressiveness,
                Aggressiveness::Aggressive.into(),
            )
            .unwrap();

        // Not active yet
        assert_eq!(store.kpis().ai_remediation_rate_memory, 56.0);

        let snapshot = store.set_scenario(Scenario::MemoryFocus);
        assert_eq!(snapshot.scenario, Scenario::MemoryFocus);
        assert_eq!(snapshot.kpis.ai_remediation_rate_memory, 66.0);
        assert_eq!(snapshot.log[0], "Scenario changed to Memory Focus");
        assert_eq!(
            snapshot.log[1],
            "Memory Focus: Tune model aggressiveness set to Aggressive"
        );
    }

    #[test]
    fn test_documented_example() {
        let mut store = DecisionStore::default();
        store.set_scenario(Scenario::MemoryFocus);
        store
            .set_decision(
                Scenario::MemoryFocus,
                DecisionField::TuneModelAggressiveness,
                Aggressiveness::Aggressive.into(),
            )
            .unwrap();
        let snapshot = store
            .set_decision(Scenario::MemoryFocus, DecisionField::InvestInExpertRules, true.into())
            .unwrap();

        assert_eq!(snapshot.kpis.ai_remediation_rate_memory, 69.0);
        assert_eq!(snapshot.kpis.ai_retry_success_rate_memory, 80.0);
        assert_eq!(snapshot.log[0], "Memory Focus: Invest in expert rules enabled");
    }

    #[test]
    fn test_toggle_flips() {
        let mut store = DecisionStore::default();
        let on = store
            .toggle_decision(Scenario::Balanced, DecisionField::EnableRightSizing)
            .unwrap();
        assert!(on.decisions.balanced.enable_right_sizing);
        assert_eq!(on.log[0], "Balanced: Right sizing enabled");

        let off = store
            .toggle_decision(Scenario::Balanced, DecisionField::EnableRightSizing)
            .unwrap();
        assert!(!off.decisions.balanced.enable_right_sizing);
        assert_eq!(off.log[0], "Balanced: Right sizing disabled");
    }

    #[test]
    fn test_toggle_rejects_enum_field() {
        let mut store = DecisionStore::default();
        let err = store
            .toggle_decision(Scenario::Balanced, DecisionField::InvestmentSplit)
            .unwrap_err();
        assert!(matches!(err, KpiSimError::Decision(DecisionError::NotAFlag(_))));
        assert!(store.log().is_empty());
    }

    #[test]
    fn test_field_must_belong_to_scenario() {
        let mut store = DecisionStore::default();
        let err = store
            .set_decision(Scenario::Balanced, DecisionField::EnableAutoRetry, true.into())
            .unwrap_err();
        assert!(matches!(
            err,
            KpiSimError::Decision(DecisionError::FieldScenarioMismatch { .. })
        ));

        let err = store
            .set_decision(Scenario::Baseline, DecisionField::EnableAutoRetry, true.into())
            .unwrap_err();
        assert!(matches!(err, KpiSimError::Decision(DecisionError::NoDecisions(_))));
        assert_eq!(store.decisions(), &Decisions::default());
    }

    #[test]
    fn test_set_decision_by_key() {
        let mut store = DecisionStore::default();
        let snapshot = store
            .set_decision_by_key("unclassified_focus", "classifierApproach", &json!("ml_clustering"))
            .unwrap();
        assert_eq!(
            snapshot.decisions.unclassified_focus.classifier_approach,
            ClassifierApproach::MlClustering
        );
        assert_eq!(
            snapshot.log[0],
            "Unclassified Focus: Classifier approach set to ML clustering"
        );
    }

    #[test]
    fn test_set_decision_by_key_errors() {
        let mut store = DecisionStore::default();
        assert!(store
            .set_decision_by_key("cost_focus", "enableRightSizing", &json!(true))
            .is_err());
        assert!(store
            .set_decision_by_key("balanced", "enableAutoRetry", &json!(true))
            .is_err());
        assert!(store
            .set_decision_by_key("balanced", "enableRightSizing", &json!("on"))
            .is_err());
        assert!(store.log().is_empty());
    }

    #[test]
    fn test_reset_restores_defaults_and_keeps_log() {
        let mut store = DecisionStore::default();
        store.set_scenario(Scenario::UnclassifiedFocus);
        store.toggle_decision_by_key("unclassified_focus", "enableAutoRetry").unwrap();

        let snapshot = store.reset();
        assert_eq!(snapshot.scenario, Scenario::Baseline);
        assert_eq!(snapshot.decisions, Decisions::default());
        assert_eq!(snapshot.kpis, DecisionStore::default().kpis());
        assert_eq!(snapshot.log.len(), 3);
        assert_eq!(snapshot.log[0], "Simulation reset");
    }

    #[test]
    fn test_comparison_follows_active_scenario() {
        let mut store = DecisionStore::default();
        let baseline = store.comparison();

        store.set_scenario(Scenario::Balanced);
        store.toggle_decision_by_key("balanced", "enableRightSizing").unwrap();

        let comparison = store.comparison();
        assert_eq!(
            comparison,
            store.engine().compare(Scenario::Balanced, store.decisions())
        );
        assert_eq!(comparison, KpiComparison::between(&store.kpis()));
        assert!(comparison.total_monthly_savings > baseline.total_monthly_savings);
    }

    #[test]
    fn test_reset_returns_to_starting_scenario() {
        let mut store = DecisionStore::with_scenario(KpiEngine::default(), Scenario::Balanced);
        store.set_scenario(Scenario::MemoryFocus);
        assert_eq!(store.reset().scenario, Scenario::Balanced);
    }
}
