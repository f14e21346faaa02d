//! Decisions - Per-scenario decision records
//!
//! Each non-baseline scenario owns a fixed record of 2-3 fields. Records are
//! plain structs, so their shape cannot change at runtime. [`DecisionField`]
//! and [`DecisionValue`] give the string-keyed boundary a closed vocabulary
//! over those same fields.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::scenario::Scenario;
use crate::error::DecisionError;

/// Closed set of options for an enum-valued decision
pub trait Choice: Copy + Sized + 'static {
    /// Every option, in display order
    const OPTIONS: &'static [Self];

    /// Wire value
    fn key(&self) -> &'static str;

    /// Human-readable label
    fn label(&self) -> &'static str;

    /// Look up an option by wire value
    fn from_key(key: &str) -> Option<Self> {
        Self::OPTIONS.iter().copied().find(|option| option.key() == key)
    }
}

/// How hard the memory remediation model is tuned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggressiveness {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl Choice for Aggressiveness {
    const OPTIONS: &'static [Self] = &[
        Aggressiveness::Conservative,
        Aggressiveness::Moderate,
        Aggressiveness::Aggressive,
    ];

    fn key(&self) -> &'static str {
        match self {
            Aggressiveness::Conservative => "conservative",
            Aggressiveness::Moderate => "moderate",
            Aggressiveness::Aggressive => "aggressive",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Aggressiveness::Conservative => "Conservative",
            Aggressiveness::Moderate => "Moderate",
            Aggressiveness::Aggressive => "Aggressive",
        }
    }
}

/// Technique used to put unclassified failures into buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierApproach {
    #[default]
    RuleBased,
    MlClustering,
    Hybrid,
}

impl Choice for ClassifierApproach {
    const OPTIONS: &'static [Self] = &[
        ClassifierApproach::RuleBased,
        ClassifierApproach::MlClustering,
        ClassifierApproach::Hybrid,
    ];

    fn key(&self) -> &'static str {
        match self {
            ClassifierApproach::RuleBased => "rule_based",
            ClassifierApproach::MlClustering => "ml_clustering",
            ClassifierApproach::Hybrid => "hybrid",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ClassifierApproach::RuleBased => "Rule-based",
            ClassifierApproach::MlClustering => "ML clustering",
            ClassifierApproach::Hybrid => "Hybrid",
        }
    }
}

/// Where the balanced scenario puts most of its effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentSplit {
    MemoryHeavy,
    #[default]
    Even,
    UnclassifiedHeavy,
}

impl Choice for InvestmentSplit {
    const OPTIONS: &'static [Self] = &[
        InvestmentSplit::MemoryHeavy,
        InvestmentSplit::Even,
        InvestmentSplit::UnclassifiedHeavy,
    ];

    fn key(&self) -> &'static str {
        match self {
            InvestmentSplit::MemoryHeavy => "memory_heavy",
            InvestmentSplit::Even => "even",
            InvestmentSplit::UnclassifiedHeavy => "unclassified_heavy",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            InvestmentSplit::MemoryHeavy => "Memory-heavy",
            InvestmentSplit::Even => "Even",
            InvestmentSplit::UnclassifiedHeavy => "Unclassified-heavy",
        }
    }
}

/// Decisions for [`Scenario::MemoryFocus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryFocusDecisions {
    pub tune_model_aggressiveness: Aggressiveness,
    pub invest_in_expert_rules: bool,
    pub expand_compute_resources: bool,
}

/// Decisions for [`Scenario::UnclassifiedFocus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnclassifiedFocusDecisions {
    pub classifier_approach: ClassifierApproach,
    pub enable_auto_retry: bool,
    pub require_human_review: bool,
}

/// Decisions for [`Scenario::Balanced`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancedDecisions {
    pub investment_split: InvestmentSplit,
    pub enable_right_sizing: bool,
}

/// Every scenario's decision record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Decisions {
    pub memory_focus: MemoryFocusDecisions,
    pub unclassified_focus: UnclassifiedFocusDecisions,
    pub balanced: BalancedDecisions,
}

/// A single decision field across all scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecisionField {
    TuneModelAggressiveness,
    InvestInExpertRules,
    ExpandComputeResources,
    ClassifierApproach,
    EnableAutoRetry,
    RequireHumanReview,
    InvestmentSplit,
    EnableRightSizing,
}

impl DecisionField {
    pub const ALL: [DecisionField; 8] = [
        DecisionField::TuneModelAggressiveness,
        DecisionField::InvestInExpertRules,
        DecisionField::ExpandComputeResources,
        DecisionField::ClassifierApproach,
        DecisionField::EnableAutoRetry,
        DecisionField::RequireHumanReview,
        DecisionField::InvestmentSplit,
        DecisionField::EnableRightSizing,
    ];

    /// Scenario that owns this field
    pub fn scenario(&self) -> Scenario {
        match self {
            DecisionField::TuneModelAggressiveness
            | DecisionField::InvestInExpertRules
            | DecisionField::ExpandComputeResources => Scenario::MemoryFocus,
            DecisionField::ClassifierApproach
            | DecisionField::EnableAutoRetry
            | DecisionField::RequireHumanReview => Scenario::UnclassifiedFocus,
            DecisionField::InvestmentSplit | DecisionField::EnableRightSizing => {
                Scenario::Balanced
            }
        }
    }

    /// Wire key (camelCase, matches the serialized record)
    pub fn key(&self) -> &'static str {
        match self {
            DecisionField::TuneModelAggressiveness => "tuneModelAggressiveness",
            DecisionField::InvestInExpertRules => "investInExpertRules",
            DecisionField::ExpandComputeResources => "expandComputeResources",
            DecisionField::ClassifierApproach => "classifierApproach",
            DecisionField::EnableAutoRetry => "enableAutoRetry",
            DecisionField::RequireHumanReview => "requireHumanReview",
            DecisionField::InvestmentSplit => "investmentSplit",
            DecisionField::EnableRightSizing => "enableRightSizing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DecisionField::TuneModelAggressiveness => "Tune model aggressiveness",
            DecisionField::InvestInExpertRules => "Invest in expert rules",
            DecisionField::ExpandComputeResources => "Expand compute resources",
            DecisionField::ClassifierApproach => "Classifier approach",
            DecisionField::EnableAutoRetry => "Automatic retry",
            DecisionField::RequireHumanReview => "Human review",
            DecisionField::InvestmentSplit => "Investment split",
            DecisionField::EnableRightSizing => "Right sizing",
        }
    }

    /// Whether the field holds a boolean
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            DecisionField::InvestInExpertRules
                | DecisionField::ExpandComputeResources
                | DecisionField::EnableAutoRetry
                | DecisionField::RequireHumanReview
                | DecisionField::EnableRightSizing
        )
    }

    /// Fields owned by a scenario, in record order
    pub fn for_scenario(scenario: Scenario) -> impl Iterator<Item = DecisionField> {
        Self::ALL.into_iter().filter(move |f| f.scenario() == scenario)
    }

    /// Resolve a wire key within a scenario
    pub fn lookup(scenario: Scenario, key: &str) -> Result<Self, DecisionError> {
        if !scenario.has_decisions() {
            return Err(DecisionError::NoDecisions(scenario.key().to_string()));
        }
        Self::for_scenario(scenario)
            .find(|field| field.key() == key)
            .ok_or_else(|| DecisionError::UnknownField {
                scenario: scenario.key().to_string(),
                field: key.to_string(),
            })
    }
}

impl std::fmt::Display for DecisionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Value held by a decision field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionValue {
    Flag(bool),
    Aggressiveness(Aggressiveness),
    Classifier(ClassifierApproach),
    Split(InvestmentSplit),
}

impl DecisionValue {
    /// Wire value: `true`/`false` for flags, the option key otherwise
    pub fn key(&self) -> &'static str {
        match self {
            DecisionValue::Flag(true) => "true",
            DecisionValue::Flag(false) => "false",
            DecisionValue::Aggressiveness(v) => v.key(),
            DecisionValue::Classifier(v) => v.key(),
            DecisionValue::Split(v) => v.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DecisionValue::Flag(true) => "enabled",
            DecisionValue::Flag(false) => "disabled",
            DecisionValue::Aggressiveness(v) => v.label(),
            DecisionValue::Classifier(v) => v.label(),
            DecisionValue::Split(v) => v.label(),
        }
    }

    /// Parse a JSON value for a specific field.
    ///
    /// Flags accept JSON booleans; enum fields accept their option keys as strings.
    pub fn from_json(field: DecisionField, value: &serde_json::Value) -> Result<Self, DecisionError> {
        let mismatch = || DecisionError::ValueMismatch {
            field: field.key().to_string(),
            value: value.to_string(),
        };

        if field.is_flag() {
            return value.as_bool().map(DecisionValue::Flag).ok_or_else(mismatch);
        }

        let key = value.as_str().ok_or_else(mismatch)?;
        let parsed = match field {
            DecisionField::TuneModelAggressiveness => {
                Aggressiveness::from_key(key).map(DecisionValue::Aggressiveness)
            }
            DecisionField::ClassifierApproach => {
                ClassifierApproach::from_key(key).map(DecisionValue::Classifier)
            }
            DecisionField::InvestmentSplit => {
                InvestmentSplit::from_key(key).map(DecisionValue::Split)
            }
            _ => None,
        };
        parsed.ok_or_else(mismatch)
    }
}

impl From<bool> for DecisionValue {
    fn from(value: bool) -> Self {
        DecisionValue::Flag(value)
    }
}

impl From<Aggressiveness> for DecisionValue {
    fn from(value: Aggressiveness) -> Self {
        DecisionValue::Aggressiveness(value)
    }
}

impl From<ClassifierApproach> for DecisionValue {
    fn from(value: ClassifierApproach) -> Self {
        DecisionValue::Classifier(value)
    }
}

impl From<InvestmentSplit> for DecisionValue {
    fn from(value: InvestmentSplit) -> Self {
        DecisionValue::Split(value)
    }
}

impl Decisions {
    /// Current value of a field
    pub fn value(&self, field: DecisionField) -> DecisionValue {
        match field {
            DecisionField::TuneModelAggressiveness => {
                self.memory_focus.tune_model_aggressiveness.into()
            }
            DecisionField::InvestInExpertRules => self.memory_focus.invest_in_expert_rules.into(),
            DecisionField::ExpandComputeResources => {
                self.memory_focus.expand_compute_resources.into()
            }
            DecisionField::ClassifierApproach => {
                self.unclassified_focus.classifier_approach.into()
            }
            DecisionField::EnableAutoRetry => self.unclassified_focus.enable_auto_retry.into(),
            DecisionField::RequireHumanReview => {
                self.unclassified_focus.require_human_review.into()
            }
            DecisionField::InvestmentSplit => self.balanced.investment_split.into(),
            DecisionField::EnableRightSizing => self.balanced.enable_right_sizing.into(),
        }
    }

    /// Replace a field's value. Fails only when the value's type does not fit the field.
    pub fn apply(&mut self, field: DecisionField, value: DecisionValue) -> Result<(), DecisionError> {
        match (field, value) {
            (DecisionField::TuneModelAggressiveness, DecisionValue::Aggressiveness(v)) => {
                self.memory_focus.tune_model_aggressiveness = v
            }
            (DecisionField::InvestInExpertRules, DecisionValue::Flag(v)) => {
                self.memory_focus.invest_in_expert_rules = v
            }
            (DecisionField::ExpandComputeResources, DecisionValue::Flag(v)) => {
                self.memory_focus.expand_compute_resources = v
            }
            (DecisionField::ClassifierApproach, DecisionValue::Classifier(v)) => {
                self.unclassified_focus.classifier_approach = v
            }
            (DecisionField::EnableAutoRetry, DecisionValue::Flag(v)) => {
                self.unclassified_focus.enable_auto_retry = v
            }
            (DecisionField::RequireHumanReview, DecisionValue::Flag(v)) => {
                self.unclassified_focus.require_human_review = v
            }
            (DecisionField::InvestmentSplit, DecisionValue::Split(v)) => {
                self.balanced.investment_split = v
            }
            (DecisionField::EnableRightSizing, DecisionValue::Flag(v)) => {
                self.balanced.enable_right_sizing = v
            }
            (field, value) => {
                return Err(DecisionError::ValueMismatch {
                    field: field.key().to_string(),
                    value: value.key().to_string(),
                })
            }
        }
        Ok(())
    }

    /// Flip a boolean field, returning its new value
    pub fn toggle(&mut self, field: DecisionField) -> Result<bool, DecisionError> {
        match self.value(field) {
            DecisionValue::Flag(current) => {
                self.apply(field, DecisionValue::Flag(!current))?;
                Ok(!current)
            }
            _ => Err(DecisionError::NotAFlag(field.key().to_string())),
        }
    }
}

impl FromStr for Aggressiveness {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| DecisionError::ValueMismatch {
            field: DecisionField::TuneModelAggressiveness.key().to_string(),
            value: s.to_string(),
        })
    }
}

impl FromStr for ClassifierApproach {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| DecisionError::ValueMismatch {
            field: DecisionField::ClassifierApproach.key().to_string(),
            value: s.to_string(),
        })
    }
}

impl FromStr for InvestmentSplit {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| DecisionError::ValueMismatch {
            field: DecisionField::InvestmentSplit.key().to_string(),
            value: s.to_string(),
        })
    }
}
