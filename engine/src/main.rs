// Engine entry point: load both datasets and print the analysis reports.
use engine::config::EngineSettings;
use engine::services::dashboard_service::DashboardEngine;
use engine::services::InsightRequest;
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting budget insight engine...");

    // Optional JSON settings file; defaults otherwise.
    let settings = match std::env::var("ENGINE_CONFIG") {
        Ok(path) => EngineSettings::load_from_file(Path::new(&path))?,
        Err(_) => EngineSettings::default(),
    };

    let dashboard = DashboardEngine::new(settings);

    for (label, result) in [
        ("spending", dashboard.load_spending().await?),
        ("debt", dashboard.load_debt().await?),
    ] {
        if result.success {
            info!(
                dataset = label,
                rows = result.rows_loaded,
                dropped = result.rows_dropped,
                "Dataset ready"
            );
        } else {
            warn!(dataset = label, reason = %result.message, "Dataset unavailable");
        }
    }

    for kind in ["pareto", "sustainability", "ranking"] {
        let response = dashboard
            .generate_insight(InsightRequest { kind: kind.to_string() })
            .await?;
        println!("{}\n", response.report);
    }

    Ok(())
}
