//! Monoatomic desorption: identifiers in order of disappearance are the
//! executed removals.

use std::collections::BTreeSet;

use tracecheck_eventlog::ExecutedEvent;
use tracecheck_trace::Timestep;

use super::id_of;
use crate::error::HarnessError;
use crate::report::ReportAggregator;

fn ids(step: &Timestep) -> BTreeSet<i64> {
    step.records.iter().filter_map(|r| r.as_id()).map(|i| i.id).collect()
}

/// Identifiers of the first snapshot in the order they vanish.
///
/// Several identifiers leaving between the same two snapshots are emitted in
/// ascending order. With `emptied`, the dump ended on a block with no atoms
/// left, so whatever remained after the last snapshot vanishes last.
pub fn removal_order(timesteps: &[Timestep], emptied: bool) -> Vec<i64> {
    let Some((first, rest)) = timesteps.split_first() else {
        return Vec::new();
    };
    let initial = ids(first);
    let mut gone = BTreeSet::new();
    let mut order = Vec::new();

    for step in rest {
        let present = ids(step);
        for &id in initial.difference(&present) {
            if gone.insert(id) {
                order.push(id);
            }
        }
    }
    if emptied {
        order.extend(initial.iter().copied().filter(|id| gone.insert(*id)));
    }
    order
}

pub fn compare(
    events: &[ExecutedEvent],
    timesteps: &[Timestep],
    emptied: bool,
    report: &mut ReportAggregator,
) -> Result<(), HarnessError> {
    let reference = removal_order(timesteps, emptied);

    for (k, event) in events.iter().enumerate() {
        let sut = id_of(event)?;
        match reference.get(k) {
            Some(&expected) => report.record(k, sut, expected, &[sut == expected]),
            None => report.record_missing(k, sut),
        }
    }

    report.reference_surplus(reference.len().saturating_sub(events.len()));
    Ok(())
}
