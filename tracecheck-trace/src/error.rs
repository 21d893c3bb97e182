use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Reference file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record on line {line} ({text:?}): {reason}")]
    Parse {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("No records follow marker {marker:?} in {path}")]
    EmptyReference { marker: String, path: PathBuf },
}
