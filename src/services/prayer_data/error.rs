use std::path::PathBuf;

use thiserror::Error;

/// A data source could not be read.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed preferences file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why the store fell back to the error snapshot. Never escapes the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no prayer data for {date_key}")]
    SourceUnavailable { date_key: String },
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("malformed prayer data for {date_key}: {source}")]
    Parse {
        date_key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no readable prayer time for {date_key}")]
    NoUsableTimes { date_key: String },
}
