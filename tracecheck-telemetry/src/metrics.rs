//! ## tracecheck-telemetry::metrics
//! **Prometheus counters for a validation run**

use prometheus::{Histogram, HistogramOpts, IntCounter, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub compared_items: IntCounter,
    pub mismatched_items: IntCounter,
    pub skipped_log_lines: IntCounter,
    pub comparison_seconds: Histogram,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let compared_items = IntCounter::new(
            "tracecheck_compared_items_total",
            "Executed events paired with a reference item",
        )?;
        let mismatched_items = IntCounter::new(
            "tracecheck_mismatched_items_total",
            "Compared items with at least one disagreeing field",
        )?;
        let skipped_log_lines = IntCounter::new(
            "tracecheck_skipped_log_lines_total",
            "Event announcements missing a required field",
        )?;
        let comparison_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "tracecheck_comparison_seconds",
                "Wall time of parse, aggregate and compare",
            )
            .buckets(vec![0.001, 0.01, 0.1, 1.0, 10.0]),
        )?;

        registry.register(Box::new(compared_items.clone()))?;
        registry.register(Box::new(mismatched_items.clone()))?;
        registry.register(Box::new(skipped_log_lines.clone()))?;
        registry.register(Box::new(comparison_seconds.clone()))?;

        Ok(Self {
            registry,
            compared_items,
            mismatched_items,
            skipped_log_lines,
            comparison_seconds,
        })
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    pub fn record_items(&self, compared: usize, mismatched: usize) {
        self.compared_items.inc_by(compared as u64);
        self.mismatched_items.inc_by(mismatched as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        let metrics = MetricsRecorder::new().unwrap();
        metrics.record_items(5, 1);
        metrics.skipped_log_lines.inc();

        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("tracecheck_compared_items_total 5"));
        assert!(text.contains("tracecheck_mismatched_items_total 1"));
        assert!(text.contains("tracecheck_skipped_log_lines_total 1"));
    }
}
