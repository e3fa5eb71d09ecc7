// Insight computations over cleaned datasets.
pub mod pareto;
pub mod ranking;
pub mod sustainability;

pub use pareto::ParetoConcentration;
pub use ranking::SpendingRanking;
pub use sustainability::SustainabilityRatio;

use crate::error::EngineError;
use serde_json::Value;
use shared::models::{DebtDataset, SpendingDataset};
use std::cmp::Ordering;

/// A stateless transform from the two immutable datasets to a Markdown
/// report. Implementations must not panic on degenerate input; they return
/// `ComputationFailure` and the caller renders an "insufficient data" note.
pub trait InsightGenerator: Send + Sync {
    fn name(&self) -> &str;
    /// Parameters used by this instance, for display/debugging.
    fn parameters(&self) -> Value;
    fn generate(
        &self,
        spending: &SpendingDataset,
        debt: &DebtDataset,
    ) -> Result<String, EngineError>;
}

/// Per-function spending totals, sorted descending. Group keys are collected
/// in input order and the sort is stable, so equal totals keep their
/// first-appearance order; the result is deterministic for a given input.
pub(crate) fn function_totals(spending: &SpendingDataset) -> Vec<(String, f64)> {
    let mut order: Vec<(String, f64)> = Vec::new();
    let mut index: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();

    for record in &spending.records {
        match index.get(record.function.as_str()) {
            Some(&i) => order[i].1 += record.realized_value,
            None => {
                index.insert(record.function.as_str(), order.len());
                order.push((record.function.clone(), record.realized_value));
            }
        }
    }

    let mut totals = order;
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    totals
}

#[cfg(test)]
pub(crate) mod test_support {
    use shared::models::{
        DatasetStatus, DebtDataset, DebtStockRecord, MacroCategory, SpendingDataset,
        SpendingRecord,
    };

    pub fn spending(entries: &[(&str, f64)]) -> SpendingDataset {
        SpendingDataset {
            records: entries
                .iter()
                .map(|(function, value)| SpendingRecord {
                    function: function.to_string(),
                    superior_agency: None,
                    subordinate_agency: None,
                    budget_unit: None,
                    expense_group: None,
                    realized_value: *value,
                    macro_category: MacroCategory::Social,
                })
                .collect(),
            rows_dropped: 0,
            status: DatasetStatus::Loaded,
        }
    }

    pub fn debt(entries: &[(i32, u32, &str, f64)]) -> DebtDataset {
        DebtDataset {
            records: entries
                .iter()
                .map(|(year, month, debt_type, value)| {
                    DebtStockRecord::new(
                        chrono::NaiveDate::from_ymd_opt(*year, *month, 1).unwrap(),
                        Some(debt_type.to_string()),
                        None,
                        *value,
                    )
                })
                .collect(),
            rows_dropped: 0,
            status: DatasetStatus::Loaded,
        }
    }

    pub fn empty_debt() -> DebtDataset {
        debt(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_totals_groups_and_sorts_descending() {
        let ds = test_support::spending(&[
            ("Educação", 10.0),
            ("Saúde", 30.0),
            ("Educação", 25.0),
        ]);
        let totals = function_totals(&ds);
        assert_eq!(totals, vec![("Educação".to_string(), 35.0), ("Saúde".to_string(), 30.0)]);
    }

    #[test]
    fn function_totals_ties_keep_input_order() {
        let ds = test_support::spending(&[("B", 10.0), ("A", 10.0), ("C", 10.0)]);
        let totals = function_totals(&ds);
        let names: Vec<&str> = totals.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }
}
