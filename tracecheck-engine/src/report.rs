//! ## tracecheck-engine::report
//! Per-item diagnostics, per-field tallies and the final verdict.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracecheck_config::EventKind;
use tracing::warn;

const RULE: &str = "--------------------------------------------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    /// Nothing was compared.
    Inconclusive,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Inconclusive => "INCONCLUSIVE",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTally {
    pub field: String,
    pub matched: usize,
    pub compared: usize,
}

impl FieldTally {
    fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            matched: 0,
            compared: 0,
        }
    }

    /// Success rate in percent, `None` when nothing was compared.
    pub fn percentage(&self) -> Option<f64> {
        (self.compared > 0).then(|| 100.0 * self.matched as f64 / self.compared as f64)
    }
}

/// SUT side and reference side of one executed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDiagnostic {
    pub step: usize,
    pub sut: String,
    /// `None` when the reference has no counterpart.
    pub reference: Option<String>,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub kind: EventKind,
    pub fields: Vec<FieldTally>,
    pub items: Vec<ItemDiagnostic>,
    pub skipped_log_lines: usize,
    pub reference_surplus: usize,
    pub verdict: Verdict,
}

impl ComparisonReport {
    pub fn mismatched_items(&self) -> usize {
        self.items.iter().filter(|item| !item.matched).count()
    }

    /// Per-item SUT/reference pairs.
    pub fn step_summary(&self) -> StepSummary<'_> {
        StepSummary(self)
    }
}

pub struct StepSummary<'a>(&'a ComparisonReport);

impl fmt::Display for StepSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "STEP SUMMARY")?;
        writeln!(f, "{RULE}")?;
        for item in &self.0.items {
            let mark = if item.matched { "" } else { "  <-- mismatch" };
            writeln!(f, "step {}: SUT       {}{mark}", item.step, item.sut)?;
            writeln!(
                f,
                "step {}: reference {}",
                item.step,
                item.reference.as_deref().unwrap_or("no reference counterpart")
            )?;
        }
        write!(f, "{RULE}")
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TEST SUMMARY ({})", self.kind)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Executed events compared: {}", self.items.len())?;
        for tally in &self.fields {
            match tally.percentage() {
                Some(pct) => writeln!(
                    f,
                    "{}: {}/{} matched ({pct:.2}%)",
                    tally.field, tally.matched, tally.compared
                )?,
                None => writeln!(f, "{}: nothing compared", tally.field)?,
            }
        }
        writeln!(f, "Skipped log lines: {}", self.skipped_log_lines)?;
        writeln!(f, "Surplus reference items: {}", self.reference_surplus)?;
        writeln!(f, "Verdict: {}", self.verdict)?;
        write!(f, "{RULE}")
    }
}

/// Accumulates per-field outcomes while a strategy walks the executed events.
#[derive(Debug)]
pub struct ReportAggregator {
    kind: EventKind,
    fields: Vec<FieldTally>,
    items: Vec<ItemDiagnostic>,
    skipped_log_lines: usize,
    reference_surplus: usize,
}

impl ReportAggregator {
    pub fn new(kind: EventKind, fields: &[&str]) -> Self {
        Self {
            kind,
            fields: fields.iter().map(|f| FieldTally::new(f)).collect(),
            items: Vec::new(),
            skipped_log_lines: 0,
            reference_surplus: 0,
        }
    }

    /// Record one compared item; `outcomes` follows field order.
    pub fn record(
        &mut self,
        step: usize,
        sut: impl fmt::Display,
        reference: impl fmt::Display,
        outcomes: &[bool],
    ) {
        debug_assert_eq!(outcomes.len(), self.fields.len());
        for (tally, &ok) in self.fields.iter_mut().zip(outcomes) {
            tally.compared += 1;
            if ok {
                tally.matched += 1;
            }
        }
        self.items.push(ItemDiagnostic {
            step,
            sut: sut.to_string(),
            reference: Some(reference.to_string()),
            matched: outcomes.iter().all(|&ok| ok),
        });
    }

    /// Executed event without a reference counterpart; mismatches every field.
    pub fn record_missing(&mut self, step: usize, sut: impl fmt::Display) {
        for tally in &mut self.fields {
            tally.compared += 1;
        }
        self.items.push(ItemDiagnostic {
            step,
            sut: sut.to_string(),
            reference: None,
            matched: false,
        });
    }

    pub fn reference_surplus(&mut self, surplus: usize) {
        if surplus > 0 {
            warn!(
                kind = %self.kind,
                surplus,
                "Reference holds more items than the executed events"
            );
        }
        self.reference_surplus = surplus;
    }

    pub fn skipped_log_lines(&mut self, skipped: usize) {
        self.skipped_log_lines = skipped;
    }

    pub fn finish(self) -> ComparisonReport {
        let verdict = if self.items.is_empty() {
            Verdict::Inconclusive
        } else if self.fields.iter().all(|t| t.matched == t.compared) {
            Verdict::Pass
        } else {
            Verdict::Fail
        };

        ComparisonReport {
            kind: self.kind,
            fields: self.fields,
            items: self.items,
            skipped_log_lines: self.skipped_log_lines,
            reference_surplus: self.reference_surplus,
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_is_inconclusive() {
        let report = ReportAggregator::new(EventKind::Deposition, &["x", "y", "z"]).finish();
        assert_eq!(report.verdict, Verdict::Inconclusive);
        assert!(report.fields.iter().all(|t| t.percentage().is_none()));
        assert!(report.to_string().contains("x: nothing compared"));
    }

    #[test]
    fn one_mismatching_field_fails_the_run() {
        let mut agg = ReportAggregator::new(EventKind::BondFormation, &["bond_type", "atom1_id"]);
        agg.record(0, "2 10", "2 10", &[true, true]);
        agg.record(1, "1 4", "1 5", &[true, false]);
        let report = agg.finish();

        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.fields[0].percentage(), Some(100.0));
        assert_eq!(report.fields[1].percentage(), Some(50.0));
        assert_eq!(report.mismatched_items(), 1);
    }

    #[test]
    fn missing_reference_counts_against_every_field() {
        let mut agg = ReportAggregator::new(EventKind::Diffusion, &["x", "y", "z"]);
        agg.record_missing(0, "(1.0, 2.0, 3.0)");
        let report = agg.finish();

        assert_eq!(report.verdict, Verdict::Fail);
        assert!(report.fields.iter().all(|t| t.compared == 1 && t.matched == 0));
        let steps = report.step_summary().to_string();
        assert!(steps.contains("no reference counterpart"));
        assert!(steps.contains("<-- mismatch"));
    }

    #[test]
    fn surplus_and_skipped_lines_do_not_fail_the_run() {
        let mut agg = ReportAggregator::new(EventKind::MonoDesorption, &["atom_id"]);
        agg.record(0, 7, 7, &[true]);
        agg.reference_surplus(3);
        agg.skipped_log_lines(2);
        let report = agg.finish();

        assert_eq!(report.verdict, Verdict::Pass);
        let summary = report.to_string();
        assert!(summary.contains("atom_id: 1/1 matched (100.00%)"));
        assert!(summary.contains("Surplus reference items: 3"));
        assert!(summary.contains("Skipped log lines: 2"));
    }

    #[tracing_test::traced_test]
    #[test]
    fn surplus_is_logged_as_warning() {
        let mut agg = ReportAggregator::new(EventKind::Diffusion, &["x", "y", "z"]);
        agg.reference_surplus(4);
        assert!(logs_contain("Reference holds more items than the executed events"));
    }

    #[test]
    fn report_serializes_to_yaml() {
        let mut agg = ReportAggregator::new(EventKind::BondBreak, &["bond_absent"]);
        agg.record(0, "type 1 pair (3, 4)", "absent from snapshot 1", &[true]);
        let yaml = serde_yaml::to_string(&agg.finish()).unwrap();
        assert!(yaml.contains("kind: bond_break"));
        assert!(yaml.contains("verdict: pass"));
    }
}
