//! ## tracecheck-telemetry::logging
//! **Structured logging with tracing and OpenTelemetry attributes**
//!
//! Human-readable progress goes to standard output through `println!` in the
//! harness; everything here is diagnostic and filtered through `RUST_LOG`.

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Install the global subscriber. A second call is a no-op.
    pub fn init() {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::NONE)
            .try_init();
    }

    /// Emit the final verdict of one validation run as a structured event.
    #[inline]
    pub fn log_verdict(event_kind: &str, verdict: &str, metadata: Vec<KeyValue>) {
        let span = info_span!(
            "conformance_verdict",
            event_kind = event_kind,
            otel.kind = "INTERNAL"
        );
        let _entered = span.enter();

        tracing::info!(verdict, metadata = ?metadata, "Conformance run finished");
    }
}
