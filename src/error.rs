use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaseError>;

/// Errors surfaced by the case core. GUI and CLI glue wrap these in `anyhow`.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid case file: {0}")]
    Parse(String),

    #[error("cell ({row}, {col}) is out of range for a {rows}x{cols} table")]
    Index {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CaseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for CaseError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
