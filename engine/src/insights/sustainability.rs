// Debt-to-budget sustainability ratio.
use super::InsightGenerator;
use crate::data::csv_parser::brazilian_format::month_abbrev;
use crate::error::EngineError;
use chrono::Datelike;
use serde_json::Value;
use shared::models::{DebtDataset, SpendingDataset};
use shared::utils::{format_currency_compact, format_decimal};

/// Compares the most recent month's outstanding debt stock against the
/// realized budget for the spending year. The debt snapshot already has
/// aggregate "Total" rows excluded, so summing across types is safe.
pub struct SustainabilityRatio;

impl InsightGenerator for SustainabilityRatio {
    fn name(&self) -> &str {
        "Sustentabilidade"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({})
    }

    fn generate(
        &self,
        spending: &SpendingDataset,
        debt: &DebtDataset,
    ) -> Result<String, EngineError> {
        let latest = debt.latest_date().ok_or_else(|| {
            EngineError::ComputationFailure("no debt-stock series available".to_string())
        })?;
        let stock = debt.stock_at(latest);

        let annual_spending = spending.total_realized();
        if annual_spending <= 0.0 {
            // Zero denominator must degrade to "insufficient data", never a
            // numeric exception surfacing as inf/NaN in the report.
            return Err(EngineError::ComputationFailure(
                "realized spending total is zero".to_string(),
            ));
        }

        let ratio = stock / annual_spending;
        Ok(format!(
            "### ⚖️ Sustentabilidade\nO estoque da dívida em {}/{} é de {}, \
             o equivalente a **{}x** o orçamento realizado no ano.",
            month_abbrev(latest.month()),
            latest.year(),
            format_currency_compact(stock),
            format_decimal(ratio, 1)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::test_support::{debt, empty_debt, spending};

    #[test]
    fn ratio_uses_latest_month_only() {
        // debt_stock=600 at the latest month, annual_spending=100 -> 6.0x
        let spending_ds = spending(&[("Saúde", 60.0), ("Educação", 40.0)]);
        let debt_ds = debt(&[
            (2023, 12, "Interna", 9999.0),
            (2024, 1, "Interna", 400.0),
            (2024, 1, "Externa", 200.0),
        ]);
        let report = SustainabilityRatio.generate(&spending_ds, &debt_ds).unwrap();
        assert!(report.contains("**6,0x**"), "report was: {}", report);
        assert!(report.contains("jan/2024"));
    }

    #[test]
    fn zero_spending_is_computation_failure() {
        let spending_ds = spending(&[]);
        let debt_ds = debt(&[(2024, 1, "Interna", 600.0)]);
        let err = SustainabilityRatio.generate(&spending_ds, &debt_ds).unwrap_err();
        assert!(matches!(err, EngineError::ComputationFailure(_)));
    }

    #[test]
    fn empty_debt_series_is_computation_failure() {
        let spending_ds = spending(&[("Saúde", 100.0)]);
        let err = SustainabilityRatio.generate(&spending_ds, &empty_debt()).unwrap_err();
        assert!(matches!(err, EngineError::ComputationFailure(_)));
    }
}
