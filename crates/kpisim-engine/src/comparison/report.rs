//! Before/after comparison report
//!
//! Pairs each "before" constant with its derived "after" value and projects
//! monthly savings from the cost reduction percentages.

use kpisim_common::Kpis;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit of a compared metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    Percent,
    Hours,
}

/// One before/after pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Metric name
    pub metric: String,
    pub unit: MetricUnit,
    pub before: f64,
    pub after: f64,
    /// `after - before`
    pub delta: f64,
    /// Whether a larger value is an improvement
    pub higher_is_better: bool,
}

impl ComparisonRow {
    fn new(metric: &str, unit: MetricUnit, before: f64, after: f64, higher_is_better: bool) -> Self {
        Self {
            metric: metric.to_string(),
            unit,
            before,
            after,
            delta: after - before,
            higher_is_better,
        }
    }

    /// Whether automation moved the metric in the right direction
    pub fn improved(&self) -> bool {
        if self.higher_is_better {
            self.delta > 0.0
        } else {
            self.delta < 0.0
        }
    }
}

/// Full comparison for a derived KPI record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiComparison {
    pub rows: Vec<ComparisonRow>,
    /// `monthly_failure_cost_before * cost_reduction%`
    pub failure_cost_savings: Decimal,
    /// `unnecessary_compute_cost_before * unnecessary_cost_reduction%`
    pub unnecessary_cost_savings: Decimal,
    pub total_monthly_savings: Decimal,
}

impl KpiComparison {
    /// Build the comparison for an already-derived record
    pub fn between(kpis: &Kpis) -> Self {
        let rows = vec![
            ComparisonRow::new(
                "Memory remediation rate",
                MetricUnit::Percent,
                kpis.remediation_rate_memory_before,
                kpis.ai_remediation_rate_memory,
                true,
            ),
            ComparisonRow::new(
                "Unclassified remediation rate",
                MetricUnit::Percent,
                kpis.remediation_rate_unclassified_before,
                kpis.ai_remediation_rate_unclassified,
                true,
            ),
            ComparisonRow::new(
                "Memory retry success rate",
                MetricUnit::Percent,
                kpis.retry_success_rate_memory_before,
                kpis.ai_retry_success_rate_memory,
                true,
            ),
            ComparisonRow::new(
                "Unclassified retry success rate",
                MetricUnit::Percent,
                kpis.retry_success_rate_unclassified_before,
                kpis.ai_retry_success_rate_unclassified,
                true,
            ),
            ComparisonRow::new(
                "Average remediation time",
                MetricUnit::Hours,
                kpis.avg_remediation_time_before_hours,
                kpis.avg_remediation_time_hours,
                false,
            ),
        ];

        let failure_cost_savings = savings(kpis.monthly_failure_cost_before, kpis.cost_reduction);
        let unnecessary_cost_savings = savings(
            kpis.unnecessary_compute_cost_before,
            kpis.unnecessary_cost_reduction,
        );

        Self {
            rows,
            failure_cost_savings,
            unnecessary_cost_savings,
            total_monthly_savings: failure_cost_savings + unnecessary_cost_savings,
        }
    }

    /// Number of metrics automation improved
    pub fn improved_count(&self) -> usize {
        self.rows.iter().filter(|row| row.improved()).count()
    }
}

fn savings(amount: Decimal, percent: f64) -> Decimal {
    let rate = Decimal::try_from(percent).unwrap_or_default() / Decimal::ONE_HUNDRED;
    (amount * rate).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_initial_savings() {
        let comparison = KpiComparison::between(&Kpis::initial());

        // 180000 * 22% and 42000 * 35%
        assert_eq!(comparison.failure_cost_savings, dec!(39600));
        assert_eq!(comparison.unnecessary_cost_savings, dec!(14700));
        assert_eq!(comparison.total_monthly_savings, dec!(54300));
    }

    #[test]
    fn test_rows_pair_before_and_after() {
        let comparison = KpiComparison::between(&Kpis::initial());
        assert_eq!(comparison.rows.len(), 5);

        let memory = &comparison.rows[0];
        assert_eq!(memory.before, 12.0);
        assert_eq!(memory.after, 56.0);
        assert_eq!(memory.delta, 44.0);
        assert!(memory.improved());
    }

    #[test]
    fn test_time_improves_when_lower() {
        let comparison = KpiComparison::between(&Kpis::initial());
        let time = comparison
            .rows
            .iter()
            .find(|row| row.unit == MetricUnit::Hours)
            .unwrap();
        assert!(!time.higher_is_better);
        assert!(time.delta < 0.0);
        assert!(time.improved());
        assert_eq!(comparison.improved_count(), 5);
    }

    #[test]
    fn test_zero_reduction_saves_nothing() {
        let mut kpis = Kpis::initial();
        kpis.cost_reduction = 0.0;
        kpis.unnecessary_cost_reduction = 0.0;

        let comparison = KpiComparison::between(&kpis);
        assert!(comparison.total_monthly_savings.is_zero());
    }

    #[test]
    fn test_serializes_units_snake_case() {
        let json = serde_json::to_value(KpiComparison::between(&Kpis::initial())).unwrap();
        assert_eq!(json["rows"][4]["unit"], "hours");
    }
}
