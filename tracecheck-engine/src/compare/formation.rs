//! Bond formation: bonds in order of first appearance are the formations.

use std::collections::HashSet;

use tracecheck_eventlog::ExecutedEvent;
use tracecheck_trace::{BondRecord, Timestep};

use super::BondEvent;
use crate::error::HarnessError;
use crate::report::ReportAggregator;

/// Every distinct bond, keyed on its unordered atom pair, in the order it
/// first shows up across snapshots. The first appearance is kept verbatim.
pub fn formation_order(timesteps: &[Timestep]) -> Vec<BondRecord> {
    let mut seen = HashSet::new();
    timesteps
        .iter()
        .flat_map(|step| step.records.iter().filter_map(|r| r.as_bond()))
        .filter(|bond| seen.insert(bond.unordered_pair()))
        .copied()
        .collect()
}

pub fn compare(
    events: &[ExecutedEvent],
    timesteps: &[Timestep],
    report: &mut ReportAggregator,
) -> Result<(), HarnessError> {
    let reference = formation_order(timesteps);

    for (k, event) in events.iter().enumerate() {
        let sut = BondEvent::from_event(event)?;
        match reference.get(k) {
            Some(expected) => {
                let expected = BondEvent {
                    bond_type: expected.bond_type,
                    atom1_id: expected.atom1_id,
                    atom2_id: expected.atom2_id,
                };
                let outcomes = [
                    sut.bond_type == expected.bond_type,
                    sut.atom1_id == expected.atom1_id,
                    sut.atom2_id == expected.atom2_id,
                ];
                report.record(k, sut, expected, &outcomes);
            }
            None => report.record_missing(k, sut),
        }
    }

    report.reference_surplus(reference.len().saturating_sub(events.len()));
    Ok(())
}
