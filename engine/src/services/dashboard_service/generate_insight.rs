// Handler for the insight operations.
use crate::cache::TtlCache;
use crate::config::EngineSettings;
use crate::error::EngineError;
use crate::insights::{
    InsightGenerator, ParetoConcentration, SpendingRanking, SustainabilityRatio,
};
use crate::services::{InsightRequest, InsightResponse};
use shared::models::{DebtDataset, SpendingDataset};

use super::{load_debt, load_spending};

pub async fn handle_generate_insight(
    request: InsightRequest,
    settings: &EngineSettings,
    spending_cache: &TtlCache<SpendingDataset>,
    debt_cache: &TtlCache<DebtDataset>,
) -> Result<InsightResponse, EngineError> {
    let generator: Box<dyn InsightGenerator> = match request.kind.to_lowercase().as_str() {
        "pareto" => Box::new(ParetoConcentration::new(settings.pareto_target_pct)),
        "sustainability" | "sustentabilidade" => Box::new(SustainabilityRatio),
        "ranking" => Box::new(SpendingRanking::new(settings.min_share_pct)),
        other => {
            tracing::warn!(kind = %other, "Unknown insight kind requested");
            return Ok(InsightResponse {
                success: false,
                insight_name: other.to_string(),
                report: format!(
                    "Unknown insight kind '{}'. Use 'pareto', 'sustainability' or 'ranking'.",
                    other
                ),
            });
        }
    };

    let spending = load_spending::cached_spending(settings, spending_cache).await?;
    let debt = load_debt::cached_debt(settings, debt_cache).await?;

    tracing::debug!(
        insight = %generator.name(),
        parameters = %generator.parameters(),
        spending_rows = spending.records.len(),
        debt_rows = debt.records.len(),
        "Running insight computation"
    );

    match generator.generate(&spending, &debt) {
        Ok(report) => Ok(InsightResponse {
            success: true,
            insight_name: generator.name().to_string(),
            report,
        }),
        Err(EngineError::ComputationFailure(reason)) => {
            tracing::warn!(insight = %generator.name(), %reason, "Insufficient data for insight");
            Ok(InsightResponse {
                success: false,
                insight_name: generator.name().to_string(),
                report: format!("### ⚠️ Dados insuficientes\n{}", reason),
            })
        }
        Err(e) => Err(e),
    }
}
