//! Kpis - Before/after automation key performance indicators
//!
//! The record has two groups:
//! - "Before" fields: constants describing the manual, pre-automation world
//! - "After" fields: the AI-assisted state, adjusted per scenario and clamped
//!
//! Rates are percentages stored as `f64`, currency amounts use `Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::BaselineError;

/// Bounded "after" fields that scenario adjustments may move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiField {
    /// Share of memory failures remediated automatically
    AiRemediationRateMemory,
    /// Share of unclassified failures remediated automatically
    AiRemediationRateUnclassified,
    /// Success rate of automated retries after memory failures
    AiRetrySuccessRateMemory,
    /// Success rate of automated retries after unclassified failures
    AiRetrySuccessRateUnclassified,
    /// Reduction of monthly failure cost
    CostReduction,
    /// Reduction of unnecessary compute spend
    UnnecessaryCostReduction,
}

impl KpiField {
    /// All bounded fields, in the order adjustments are reported
    pub const ALL: [KpiField; 6] = [
        KpiField::AiRemediationRateMemory,
        KpiField::AiRemediationRateUnclassified,
        KpiField::AiRetrySuccessRateMemory,
        KpiField::AiRetrySuccessRateUnclassified,
        KpiField::CostReduction,
        KpiField::UnnecessaryCostReduction,
    ];

    /// Valid `[min, max]` range for this field
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            KpiField::AiRemediationRateMemory | KpiField::AiRemediationRateUnclassified => {
                (0.0, crate::MAX_REMEDIATION_RATE)
            }
            KpiField::AiRetrySuccessRateMemory | KpiField::AiRetrySuccessRateUnclassified => {
                (0.0, crate::MAX_SUCCESS_RATE)
            }
            KpiField::CostReduction | KpiField::UnnecessaryCostReduction => {
                (0.0, crate::MAX_COST_REDUCTION)
            }
        }
    }

    /// Clamp a raw value into this field's range
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        let (min, max) = self.bounds();
        value.clamp(min, max)
    }

    /// Wire name of the field
    pub fn key(&self) -> &'static str {
        match self {
            KpiField::AiRemediationRateMemory => "ai_remediation_rate_memory",
            KpiField::AiRemediationRateUnclassified => "ai_remediation_rate_unclassified",
            KpiField::AiRetrySuccessRateMemory => "ai_retry_success_rate_memory",
            KpiField::AiRetrySuccessRateUnclassified => "ai_retry_success_rate_unclassified",
            KpiField::CostReduction => "cost_reduction",
            KpiField::UnnecessaryCostReduction => "unnecessary_cost_reduction",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            KpiField::AiRemediationRateMemory => "Memory remediation rate",
            KpiField::AiRemediationRateUnclassified => "Unclassified remediation rate",
            KpiField::AiRetrySuccessRateMemory => "Memory retry success rate",
            KpiField::AiRetrySuccessRateUnclassified => "Unclassified retry success rate",
            KpiField::CostReduction => "Failure cost reduction",
            KpiField::UnnecessaryCostReduction => "Unnecessary cost reduction",
        }
    }
}

impl std::fmt::Display for KpiField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Full KPI snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    // Before automation (constants)
    /// Memory failures remediated manually (%)
    pub remediation_rate_memory_before: f64,
    /// Unclassified failures remediated manually (%)
    pub remediation_rate_unclassified_before: f64,
    /// Manual retry success after memory failures (%)
    pub retry_success_rate_memory_before: f64,
    /// Manual retry success after unclassified failures (%)
    pub retry_success_rate_unclassified_before: f64,
    /// Mean time to remediate a failure by hand (hours)
    pub avg_remediation_time_before_hours: f64,
    /// Monthly cost of failed runs
    pub monthly_failure_cost_before: Decimal,
    /// Monthly compute spend on runs that did not need to happen
    pub unnecessary_compute_cost_before: Decimal,

    // After automation (derived)
    pub ai_remediation_rate_memory: f64,
    pub ai_remediation_rate_unclassified: f64,
    pub ai_retry_success_rate_memory: f64,
    pub ai_retry_success_rate_unclassified: f64,
    /// Reduction of `monthly_failure_cost_before` (%)
    pub cost_reduction: f64,
    /// Reduction of `unnecessary_compute_cost_before` (%)
    pub unnecessary_cost_reduction: f64,
    /// Time to remediate once a failure is handled automatically (hours)
    pub ai_remediation_time_hours: f64,
    /// Blend of automated and manual remediation time (hours)
    pub avg_remediation_time_hours: f64,
}

impl Default for Kpis {
    fn default() -> Self {
        Self::initial()
    }
}

impl Kpis {
    /// The documented initial constants.
    ///
    /// `avg_remediation_time_hours` is consistent with the blend formula:
    /// `(94 * 0.75 + 106 * 4.5) / 200 = 2.7375`.
    pub fn initial() -> Self {
        Self {
            remediation_rate_memory_before: 12.0,
            remediation_rate_unclassified_before: 5.0,
            retry_success_rate_memory_before: 35.0,
            retry_success_rate_unclassified_before: 22.0,
            avg_remediation_time_before_hours: 4.5,
            monthly_failure_cost_before: dec!(180000),
            unnecessary_compute_cost_before: dec!(42000),

            ai_remediation_rate_memory: 56.0,
            ai_remediation_rate_unclassified: 38.0,
            ai_retry_success_rate_memory: 60.0,
            ai_retry_success_rate_unclassified: 48.0,
            cost_reduction: 22.0,
            unnecessary_cost_reduction: 35.0,
            ai_remediation_time_hours: 0.75,
            avg_remediation_time_hours: 2.7375,
        }
    }

    /// Read a bounded field
    pub fn get(&self, field: KpiField) -> f64 {
        match field {
            KpiField::AiRemediationRateMemory => self.ai_remediation_rate_memory,
            KpiField::AiRemediationRateUnclassified => self.ai_remediation_rate_unclassified,
            KpiField::AiRetrySuccessRateMemory => self.ai_retry_success_rate_memory,
            KpiField::AiRetrySuccessRateUnclassified => self.ai_retry_success_rate_unclassified,
            KpiField::CostReduction => self.cost_reduction,
            KpiField::UnnecessaryCostReduction => self.unnecessary_cost_reduction,
        }
    }

    /// Mutable access to a bounded field
    pub fn get_mut(&mut self, field: KpiField) -> &mut f64 {
        match field {
            KpiField::AiRemediationRateMemory => &mut self.ai_remediation_rate_memory,
            KpiField::AiRemediationRateUnclassified => &mut self.ai_remediation_rate_unclassified,
            KpiField::AiRetrySuccessRateMemory => &mut self.ai_retry_success_rate_memory,
            KpiField::AiRetrySuccessRateUnclassified => {
                &mut self.ai_retry_success_rate_unclassified
            }
            KpiField::CostReduction => &mut self.cost_reduction,
            KpiField::UnnecessaryCostReduction => &mut self.unnecessary_cost_reduction,
        }
    }

    /// Check that baseline constants are usable.
    ///
    /// Bounded fields must already sit inside their ranges, the other
    /// percentages inside [0, 100], and hours and currency must be non-negative.
    pub fn validate(&self) -> Result<(), BaselineError> {
        for field in KpiField::ALL {
            let (min, max) = field.bounds();
            check_range(field.key(), self.get(field), min, max)?;
        }

        check_range(
            "remediation_rate_memory_before",
            self.remediation_rate_memory_before,
            0.0,
            100.0,
        )?;
        check_range(
            "remediation_rate_unclassified_before",
            self.remediation_rate_unclassified_before,
            0.0,
            100.0,
        )?;
        check_range(
            "retry_success_rate_memory_before",
            self.retry_success_rate_memory_before,
            0.0,
            100.0,
        )?;
        check_range(
            "retry_success_rate_unclassified_before",
            self.retry_success_rate_unclassified_before,
            0.0,
            100.0,
        )?;
        check_range(
            "avg_remediation_time_before_hours",
            self.avg_remediation_time_before_hours,
            0.0,
            f64::MAX,
        )?;
        check_range("ai_remediation_time_hours", self.ai_remediation_time_hours, 0.0, f64::MAX)?;

        if self.monthly_failure_cost_before.is_sign_negative() {
            return Err(BaselineError::NegativeAmount {
                field: "monthly_failure_cost_before",
                value: self.monthly_failure_cost_before.to_string(),
            });
        }
        if self.unnecessary_compute_cost_before.is_sign_negative() {
            return Err(BaselineError::NegativeAmount {
                field: "unnecessary_compute_cost_before",
                value: self.unnecessary_compute_cost_before.to_string(),
            });
        }

        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), BaselineError> {
    // NaN fails both comparisons, so test for containment rather than exclusion
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(BaselineError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl std::fmt::Display for Kpis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Kpis(remediation mem={:.0}%/uncl={:.0}%, retry mem={:.0}%/uncl={:.0}%, cost -{:.0}%, unnecessary -{:.0}%, avg {:.2}h)",
            self.ai_remediation_rate_memory,
            self.ai_remediation_rate_unclassified,
            self.ai_retry_success_rate_memory,
            self.ai_retry_success_rate_unclassified,
            self.cost_reduction,
            self.unnecessary_cost_reduction,
            self.avg_remediation_time_hours
        )
    }
}
