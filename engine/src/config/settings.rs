// Engine settings, loadable from a JSON file or taken from defaults.
use crate::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    /// Yearly spending CSV (semicolon-delimited, Transparency Portal export).
    pub spending_csv_path: PathBuf,
    /// Monthly debt-stock CSV (semicolon-delimited, Tesouro Nacional export).
    pub debt_csv_path: PathBuf,
    /// How long a loaded snapshot stays fresh before the next request reloads it.
    pub cache_ttl_secs: u64,
    /// Cumulative-share target for the concentration report.
    pub pareto_target_pct: f64,
    /// Entries below this share of the grand total are left out of rankings.
    pub min_share_pct: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            spending_csv_path: PathBuf::from("gastos_orcamento_2025.csv"),
            debt_csv_path: PathBuf::from("divida_estoque_historico.csv"),
            cache_ttl_secs: 3600,
            pareto_target_pct: 80.0,
            min_share_pct: 0.1,
        }
    }
}

impl EngineSettings {
    pub fn load_from_file(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let settings: EngineSettings = serde_json::from_str(&contents).map_err(|e| {
            EngineError::ConfigError(format!("invalid settings in '{}': {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=100.0).contains(&self.pareto_target_pct) {
            return Err(EngineError::ConfigError(format!(
                "pareto_target_pct must be within 0..=100, got {}",
                self.pareto_target_pct
            )));
        }
        if self.min_share_pct < 0.0 {
            return Err(EngineError::ConfigError(format!(
                "min_share_pct must be non-negative, got {}",
                self.min_share_pct
            )));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache_ttl_secs)
    }
}
