use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering, writing or reading a report document.
///
/// These never cross the [`ReportTree`](super::ReportTree) mutation API; the tree
/// logs them and keeps going.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed report document: {0}")]
    Xml(String),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}
