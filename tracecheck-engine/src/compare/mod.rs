//! Differential comparison of executed events against the reference trace.
//!
//! Each strategy walks the executed events in commit order and pairs event
//! `k` with the reference item it should correspond to. The executed sequence
//! is authoritative: an event with no counterpart mismatches every field,
//! while leftover reference items are only reported as surplus.

pub mod disappearance;
pub mod displacement;
pub mod formation;
pub mod placement;
pub mod removal;

use std::fmt;

use tracecheck_eventlog::{EventLog, ExecutedEvent};
use tracecheck_trace::{round_point, CoordRecord, EntityRecord, ReferenceTrace};
use tracing::{debug, instrument};

use crate::error::HarnessError;
use crate::kind::{KindDescriptor, Strategy};
use crate::report::{ComparisonReport, ReportAggregator};

/// Compare `log` against `reference` using the descriptor's strategy.
#[instrument(level = "debug", skip_all, fields(kind = %descriptor.kind))]
pub fn compare(
    descriptor: &KindDescriptor,
    log: &EventLog,
    reference: &ReferenceTrace,
    precision: u32,
) -> Result<ComparisonReport, HarnessError> {
    let mut report = ReportAggregator::new(descriptor.kind, descriptor.strategy.compared_fields());
    report.skipped_log_lines(log.skipped.len());
    let events = &log.events;

    match descriptor.strategy {
        Strategy::RemovalExistence { boundary } => {
            removal::compare(events, &reference.timesteps(boundary)?, &mut report)?
        }
        Strategy::FormationOrder { boundary } => {
            formation::compare(events, &reference.timesteps(boundary)?, &mut report)?
        }
        Strategy::Centroid => placement::compare(
            events,
            &coords(reference.final_snapshot()?),
            precision,
            &mut report,
        )?,
        Strategy::Displacement { mobile_type } => displacement::compare(
            events,
            &coords(reference.final_snapshot()?),
            mobile_type,
            precision,
            &mut report,
        )?,
        Strategy::Disappearance { boundary } => {
            // An emptied system leaves a final block with no records.
            let emptied = reference.segments().last().is_some_and(|s| s.is_empty());
            disappearance::compare(
                events,
                &reference.timesteps(boundary)?,
                emptied,
                &mut report,
            )?
        }
    }

    let report = report.finish();
    debug!(
        items = report.items.len(),
        mismatched = report.mismatched_items(),
        verdict = %report.verdict,
        "Comparison finished"
    );
    Ok(report)
}

fn coords(records: Vec<EntityRecord>) -> Vec<CoordRecord> {
    records
        .into_iter()
        .filter_map(|r| r.as_coord().copied())
        .collect()
}

/// Bond as announced by a formation or break event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondEvent {
    pub bond_type: i64,
    pub atom1_id: i64,
    pub atom2_id: i64,
}

impl BondEvent {
    fn from_event(event: &ExecutedEvent) -> Result<Self, HarnessError> {
        let field = |i| {
            event.int(i).ok_or(HarnessError::EventShape {
                line: event.line,
                expected: "three integer bond fields",
            })
        };
        Ok(Self {
            bond_type: field(0)?,
            atom1_id: field(1)?,
            atom2_id: field(2)?,
        })
    }

    pub fn unordered_pair(&self) -> (i64, i64) {
        (self.atom1_id.min(self.atom2_id), self.atom1_id.max(self.atom2_id))
    }
}

impl fmt::Display for BondEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bond_type={} atom1_id={} atom2_id={}",
            self.bond_type, self.atom1_id, self.atom2_id
        )
    }
}

fn point_of(event: &ExecutedEvent) -> Result<[f64; 3], HarnessError> {
    let axis = |i| {
        event.real(i).ok_or(HarnessError::EventShape {
            line: event.line,
            expected: "three coordinates",
        })
    };
    Ok([axis(0)?, axis(1)?, axis(2)?])
}

fn id_of(event: &ExecutedEvent) -> Result<i64, HarnessError> {
    event.int(0).ok_or(HarnessError::EventShape {
        line: event.line,
        expected: "an integer identifier",
    })
}

/// Point already rounded to `precision` decimals.
struct Rounded {
    point: [f64; 3],
    precision: usize,
}

impl Rounded {
    fn new(point: [f64; 3], precision: u32) -> Self {
        Self {
            point: round_point(point, precision),
            precision: precision as usize,
        }
    }

    fn axis_matches(&self, other: &Rounded) -> [bool; 3] {
        [0, 1, 2].map(|i| self.point[i] == other.point[i])
    }
}

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.point;
        let p = self.precision;
        write!(f, "({x:.p$}, {y:.p$}, {z:.p$})")
    }
}

/// Shared walk for strategies whose reference is an ordered list of points.
/// Surplus is left to the caller, which knows what counts as a reference item.
fn compare_points(
    events: &[ExecutedEvent],
    reference: &[Option<[f64; 3]>],
    precision: u32,
    report: &mut ReportAggregator,
) -> Result<(), HarnessError> {
    for (k, event) in events.iter().enumerate() {
        let sut = Rounded::new(point_of(event)?, precision);
        match reference.get(k).copied().flatten() {
            Some(expected) => {
                let expected = Rounded::new(expected, precision);
                let outcomes = sut.axis_matches(&expected);
                report.record(k, &sut, &expected, &outcomes);
            }
            None => report.record_missing(k, &sut),
        }
    }
    Ok(())
}
