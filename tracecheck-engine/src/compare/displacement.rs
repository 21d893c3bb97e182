//! Diffusion: reported hop targets must equal the final positions of the
//! mobile atoms, in dump order.

use tracecheck_eventlog::ExecutedEvent;
use tracecheck_trace::CoordRecord;

use super::compare_points;
use crate::error::HarnessError;
use crate::report::ReportAggregator;

pub fn mobile_positions(snapshot: &[CoordRecord], mobile_type: i64) -> Vec<[f64; 3]> {
    snapshot
        .iter()
        .filter(|c| c.entity_id == mobile_type)
        .map(|c| [c.x, c.y, c.z])
        .collect()
}

pub fn compare(
    events: &[ExecutedEvent],
    snapshot: &[CoordRecord],
    mobile_type: i64,
    precision: u32,
    report: &mut ReportAggregator,
) -> Result<(), HarnessError> {
    let positions: Vec<_> = mobile_positions(snapshot, mobile_type)
        .into_iter()
        .map(Some)
        .collect();
    compare_points(events, &positions, precision, report)?;
    report.reference_surplus(positions.len().saturating_sub(events.len()));
    Ok(())
}
