//! # tracecheck Telemetry
//!
//! Crate for logging and run metrics.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
