use std::path::PathBuf;

use thiserror::Error;
use tracecheck_config::ConfigError;
use tracecheck_eventlog::EventLogError;
use tracecheck_trace::TraceError;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Reference trace error: {0}")]
    Trace(#[from] TraceError),

    #[error("Execution log error: {0}")]
    EventLog(#[from] EventLogError),

    #[error("No event kind configured")]
    MissingKind,

    #[error("Executable directory {path} is not accessible: {source}")]
    ExecutableDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create execution log {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` did not finish successfully ({reason}); comparison skipped")]
    Launch { command: String, reason: String },

    #[error("Event on log line {line} does not carry {expected}")]
    EventShape { line: usize, expected: &'static str },

    #[error("Cannot write report {path}: {reason}")]
    ReportWrite { path: PathBuf, reason: String },

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}
