use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Dataset file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Both decode attempts (UTF-8, then Latin-1) failed, or the bytes were
    /// not parseable as a `;`-delimited table under either encoding.
    #[error("Encoding or parse failure for '{}': {reason}", .path.display())]
    EncodingOrParse { path: PathBuf, reason: String },

    /// A required column could not be resolved even heuristically.
    #[error("Schema mismatch: no column matching required field '{field}' (headers: {headers:?})")]
    SchemaMismatch { field: &'static str, headers: Vec<String> },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    /// An insight hit degenerate input (empty group, zero denominator).
    /// Always recovered to a user-facing "insufficient data" message.
    #[error("Computation failure: {0}")]
    ComputationFailure(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// True for failures that abort a single dataset's load but must not
    /// propagate past it; the caller substitutes an empty snapshot.
    pub fn is_dataset_level(&self) -> bool {
        matches!(
            self,
            EngineError::FileNotFound { .. }
                | EngineError::EncodingOrParse { .. }
                | EngineError::SchemaMismatch { .. }
                | EngineError::CsvSystemError { .. }
                | EngineError::IoError { .. }
        )
    }
}
