use std::path::PathBuf;

/// Errors returned by the analysis core and its file-backed helpers.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// No numeric values to compute a mean/standard deviation from.
    #[error("Insufficient data: {rows} rows, {numeric_cells} numeric cells")]
    InsufficientData { rows: usize, numeric_cells: usize },

    #[error("Invalid outlier threshold: {0} (must be finite and >= 0)")]
    InvalidThreshold(f64),

    #[error("Cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
