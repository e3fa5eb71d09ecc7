// Ranked listing of spending by function with share of the total.
use super::{function_totals, InsightGenerator};
use crate::error::EngineError;
use serde_json::Value;
use shared::models::{DebtDataset, SpendingDataset};
use shared::utils::{format_currency_compact, format_percent};

pub struct SpendingRanking {
    name: String,
    /// Materiality cutoff: entries at or below this share of the grand
    /// total are left out of the listing.
    min_share_pct: f64,
}

impl SpendingRanking {
    pub fn new(min_share_pct: f64) -> Self {
        Self { name: format!("Ranking(>{}%)", min_share_pct), min_share_pct }
    }
}

impl InsightGenerator for SpendingRanking {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "min_share_pct": self.min_share_pct })
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
                "no spending data to rank".to_string(),
            ));
        }

        let mut lines = vec!["### 🏆 Ranking de funções".to_string()];
        let mut position = 0usize;
        for (function, value) in &totals {
            let share_pct = (value / grand_total) * 100.0;
            if share_pct <= self.min_share_pct {
                continue;
            }
            position += 1;
            lines.push(format!(
                "{}. **{}** — {} ({})",
                position,
                function,
                format_currency_compact(*value),
                format_percent(share_pct)
            ));
        }
        Ok(lines.join("\n"))
    }
}
