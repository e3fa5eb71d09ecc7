// Handler for loading/refreshing the spending dataset.
use crate::cache::TtlCache;
use crate::config::EngineSettings;
use crate::data::spending::SpendingCsvLoader;
use crate::error::EngineError;
use crate::services::DatasetLoadResponse;
use shared::models::{DatasetStatus, SpendingDataset};
use std::sync::Arc;

pub(crate) const CACHE_KEY: &str = "spending";

/// Builds a fresh snapshot. Dataset-level failures (missing file, encoding,
/// schema) are demoted to an empty `Unavailable` snapshot so one broken
/// file never takes the rest of the dashboard down; anything else is a real
/// error and propagates.
pub(crate) fn spending_snapshot(
    settings: &EngineSettings,
) -> Result<SpendingDataset, EngineError> {
    match SpendingCsvLoader::load_records(&settings.spending_csv_path) {
        Ok((records, rows_dropped)) => Ok(SpendingDataset {
            records,
            rows_dropped,
            status: DatasetStatus::Loaded,
        }),
        Err(e) if e.is_dataset_level() => {
            tracing::error!(
                path = %settings.spending_csv_path.display(),
                error = %e,
                "Spending dataset unavailable"
            );
            Ok(SpendingDataset::unavailable(e.to_string()))
        }
        Err(e) => Err(e),
    }
}

pub(crate) async fn cached_spending(
    settings: &EngineSettings,
    cache: &TtlCache<SpendingDataset>,
) -> Result<Arc<SpendingDataset>, EngineError> {
    cache.get_or_load(CACHE_KEY, || spending_snapshot(settings)).await
}

pub async fn handle_load_spending(
    settings: &EngineSettings,
    cache: &TtlCache<SpendingDataset>,
) -> Result<DatasetLoadResponse, EngineError> {
    let snapshot = cached_spending(settings, cache).await?;
    Ok(match &snapshot.status {
        DatasetStatus::Loaded => DatasetLoadResponse {
            success: true,
            message: format!("Loaded {} spending records", snapshot.records.len()),
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
