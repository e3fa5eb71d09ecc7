// Concentration (80/20) analysis of spending by government function.
use super::{function_totals, InsightGenerator};
use crate::error::EngineError;
use serde_json::Value;
use shared::models::{DebtDataset, SpendingDataset};
use shared::utils::format_percent;

pub struct ParetoConcentration {
    name: String,
    target_pct: f64,
}

impl ParetoConcentration {
    pub fn new(target_pct: f64) -> Self {
        Self { name: format!("Pareto({}%)", target_pct), target_pct }
    }

    /// Minimal number of leading functions (sorted descending) whose
    /// cumulative share reaches or exceeds the target. Counted as one plus
    /// the functions strictly below the target, so a function landing
    /// exactly on the boundary is included once: for shares {80, 15, 5} at
    /// an 80% target the count is 1.
    fn count_to_target(totals: &[(String, f64)], grand_total: f64, target_pct: f64) -> usize {
        let mut running = 0.0;
        let mut below = 0usize;
        for (_, value) in totals {
            running += value;
            if (running / grand_total) * 100.0 < target_pct {
                below += 1;
            } else {
                break;
            }
        }
        (below + 1).min(totals.len())
    }
}

impl InsightGenerator for ParetoConcentration {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "target_pct": self.target_pct })
    }

    fn generate(
        &self,
        spending: &SpendingDataset,
        _debt: &DebtDataset,
    ) -> Result<String, EngineError> {
        let totals = function_totals(spending);
        let grand_total: f64 = totals.iter().map(|(_, v)| v).sum();
        if totals.is_empty() || grand_total <= 0.0 {
            return Err(EngineError::ComputationFailure(
                "no spending data to analyze concentration".to_string(),
            ));
        }

        let count = Self::count_to_target(&totals, grand_total, self.target_pct);
        let (top_function, top_value) = &totals[0];
        let top_share = (top_value / grand_total) * 100.0;

        Ok(format!(
            "### 📉 Concentração (Pareto)\n**{} funções** concentram {}% dos gastos realizados. \
             A maior é **{}**, com {} do total.",
            count, self.target_pct, top_function, format_percent(top_share)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::test_support::{empty_debt, spending};

    #[test]
    fn boundary_function_is_counted_once() {
        // A alone lands exactly on 80%: the answer is 1, not 2.
        let ds = spending(&[("A", 80.0), ("B", 15.0), ("C", 5.0)]);
        let report = ParetoConcentration::new(80.0).generate(&ds, &empty_debt()).unwrap();
        assert!(report.contains("**1 funções**"), "report was: {}", report);
        assert!(report.contains("**A**"));
        assert!(report.contains("80,0%"));
    }

    #[test]
    fn count_crosses_target_mid_list() {
        // Cumulative shares: 50, 90 -> two functions reach 80%.
        let ds = spending(&[("A", 50.0), ("B", 40.0), ("C", 10.0)]);
        let report = ParetoConcentration::new(80.0).generate(&ds, &empty_debt()).unwrap();
        assert!(report.contains("**2 funções**"), "report was: {}", report);
    }

    #[test]
    fn count_never_exceeds_function_count() {
        let ds = spending(&[("A", 1.0), ("B", 1.0)]);
        let report = ParetoConcentration::new(100.0).generate(&ds, &empty_debt()).unwrap();
        assert!(report.contains("**2 funções**"), "report was: {}", report);
    }

    #[test]
    fn grouping_happens_before_ranking() {
        // B appears twice and only leads after summing.
        let ds = spending(&[("A", 40.0), ("B", 30.0), ("B", 30.0)]);
        let report = ParetoConcentration::new(80.0).generate(&ds, &empty_debt()).unwrap();
        assert!(report.contains("A maior é **B**"), "report was: {}", report);
    }

    #[test]
    fn empty_spending_is_computation_failure() {
        let ds = spending(&[]);
        let err = ParetoConcentration::new(80.0).generate(&ds, &empty_debt()).unwrap_err();
        assert!(matches!(err, EngineError::ComputationFailure(_)));
    }

    #[test]
    fn zero_total_is_computation_failure() {
        let ds = spending(&[("A", 0.0), ("B", 0.0)]);
        let err = ParetoConcentration::new(80.0).generate(&ds, &empty_debt()).unwrap_err();
        assert!(matches!(err, EngineError::ComputationFailure(_)));
    }

    #[test]
    fn parameters_expose_target() {
        let p = ParetoConcentration::new(80.0);
        assert_eq!(p.parameters()["target_pct"], 80.0);
        assert_eq!(p.name(), "Pareto(80%)");
    }
}
