// Handler for loading/refreshing the debt-stock dataset.
use crate::cache::TtlCache;
use crate::config::EngineSettings;
use crate::data::debt::DebtCsvLoader;
use crate::error::EngineError;
use crate::services::DatasetLoadResponse;
use shared::models::{DatasetStatus, DebtDataset};
use std::sync::Arc;

pub(crate) const CACHE_KEY: &str = "debt";

pub(crate) fn debt_snapshot(settings: &EngineSettings) -> Result<DebtDataset, EngineError> {
    match DebtCsvLoader::load_records(&settings.debt_csv_path) {
        Ok((records, rows_dropped)) => Ok(DebtDataset {
            records,
            rows_dropped,
            status: DatasetStatus::Loaded,
        }),
        Err(e) if e.is_dataset_level() => {
            tracing::error!(
                path = %settings.debt_csv_path.display(),
                error = %e,
                "Debt dataset unavailable"
            );
            Ok(DebtDataset::unavailable(e.to_string()))
        }
        Err(e) => Err(e),
    }
}

pub(crate) async fn cached_debt(
    settings: &EngineSettings,
    cache: &TtlCache<DebtDataset>,
) -> Result<Arc<DebtDataset>, EngineError> {
    cache.get_or_load(CACHE_KEY, || debt_snapshot(settings)).await
}

pub async fn handle_load_debt(
    settings: &EngineSettings,
    cache: &TtlCache<DebtDataset>,
) -> Result<DatasetLoadResponse, EngineError> {
    let snapshot = cached_debt(settings, cache).await?;
    Ok(match &snapshot.status {
        DatasetStatus::Loaded => DatasetLoadResponse {
            success: true,
            message: format!("Loaded {} debt-stock records", snapshot.records.len()),
            rows_loaded: snapshot.records.len(),
            rows_dropped: snapshot.rows_dropped,
        },
        DatasetStatus::Unavailable(reason) => DatasetLoadResponse {
            success: false,
            message: reason.clone(),
            rows_loaded: 0,
            rows_dropped: 0,
        },
    })
}
