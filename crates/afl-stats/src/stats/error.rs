// Error type shared by the stats loading, cleaning and writing stages.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("stats file not readable: {path}: {source}")]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is missing required columns: {}", .missing.join(", "))]
    Schema { path: PathBuf, missing: Vec<String> },

    #[error("no stats loaded; call load_data() first")]
    NotLoaded,

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("unknown metric column `{0}`")]
    UnknownMetric(String),
}
