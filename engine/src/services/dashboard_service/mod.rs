// Dashboard engine: owns the settings and the two dataset caches, and
// dispatches each operation to its sibling handler module.
use crate::cache::TtlCache;
use crate::config::EngineSettings;
use crate::error::EngineError;
use crate::services::{DatasetLoadResponse, InsightRequest, InsightResponse};
use shared::models::{DebtDataset, SpendingDataset};

pub mod generate_insight;
pub mod load_debt;
pub mod load_spending;

pub struct DashboardEngine {
    settings: EngineSettings,
    spending_cache: TtlCache<SpendingDataset>,
    debt_cache: TtlCache<DebtDataset>,
}

impl DashboardEngine {
    pub fn new(settings: EngineSettings) -> Self {
        let ttl = settings.cache_ttl();
        DashboardEngine {
            settings,
            spending_cache: TtlCache::new(ttl),
            debt_cache: TtlCache::new(ttl),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub async fn load_spending(&self) -> Result<DatasetLoadResponse, EngineError> {
        tracing::info!(
            path = %self.settings.spending_csv_path.display(),
            "Loading spending dataset"
        );
        load_spending::handle_load_spending(&self.settings, &self.spending_cache).await
    }

    pub async fn load_debt(&self) -> Result<DatasetLoadResponse, EngineError> {
        tracing::info!(
            path = %self.settings.debt_csv_path.display(),
            "Loading debt-stock dataset"
        );
        load_debt::handle_load_debt(&self.settings, &self.debt_cache).await
    }

    pub async fn generate_insight(
        &self,
        request: InsightRequest,
    ) -> Result<InsightResponse, EngineError> {
        tracing::info!(kind = %request.kind, "Generating insight");
        generate_insight::handle_generate_insight(
            request,
            &self.settings,
            &self.spending_cache,
            &self.debt_cache,
        )
        .await
    }
}
