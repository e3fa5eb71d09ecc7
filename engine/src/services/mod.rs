// Service layer: the facade a dashboard front end talks to.
pub mod dashboard_service;

use serde::{Deserialize, Serialize};

/// Outcome of loading (or refreshing) one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetLoadResponse {
    pub success: bool,
    pub message: String,
    pub rows_loaded: usize,
    /// Rows discarded during cleaning (unparseable values/dates).
    pub rows_dropped: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightRequest {
    /// One of "pareto", "sustainability", "ranking".
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightResponse {
    pub success: bool,
    pub insight_name: String,
    /// Markdown report, or a user-facing "insufficient data" note when the
    /// computation could not run.
    pub report: String,
}
