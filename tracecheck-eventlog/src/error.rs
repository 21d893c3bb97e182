use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("Execution log not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid field pattern for {field}: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}
