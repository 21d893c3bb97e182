//! Deposition: the reported centre of placement `k` must be the centroid of
//! molecule `k + 1` in the final snapshot.

use std::collections::BTreeSet;

use tracecheck_eventlog::ExecutedEvent;
use tracecheck_trace::CoordRecord;

use super::compare_points;
use crate::error::HarnessError;
use crate::report::ReportAggregator;

/// Arithmetic mean of the members of `group`, `None` if it has no members.
pub fn group_centroid(snapshot: &[CoordRecord], group: i64) -> Option<[f64; 3]> {
    let (sum, count) = snapshot
        .iter()
        .filter(|c| c.entity_id == group)
        .fold(([0.0; 3], 0usize), |(sum, n), c| {
            ([sum[0] + c.x, sum[1] + c.y, sum[2] + c.z], n + 1)
        });
    (count > 0).then(|| sum.map(|axis| axis / count as f64))
}

/// Molecules in the snapshot beyond the first `placed` groups.
pub fn unplaced_groups(snapshot: &[CoordRecord], placed: usize) -> usize {
    snapshot
        .iter()
        .map(|c| c.entity_id)
        .filter(|&group| group > placed as i64)
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn compare(
    events: &[ExecutedEvent],
    snapshot: &[CoordRecord],
    precision: u32,
    report: &mut ReportAggregator,
) -> Result<(), HarnessError> {
    let centroids: Vec<_> = (1..=events.len() as i64)
        .map(|group| group_centroid(snapshot, group))
        .collect();
    compare_points(events, &centroids, precision, report)?;
    report.reference_surplus(unplaced_groups(snapshot, events.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::fixtures::{coord, real_event};
    use crate::report::Verdict;
    use tracecheck_config::EventKind;

    fn run(events: &[ExecutedEvent], snapshot: &[CoordRecord]) -> crate::report::ComparisonReport {
        let mut report = ReportAggregator::new(EventKind::Deposition, &["x", "y", "z"]);
        compare(events, snapshot, 4, &mut report).unwrap();
        report.finish()
    }

    #[test]
    fn centroid_is_the_member_mean() {
        let snapshot = [
            coord(1, 1.0, 0.0, -2.0),
            coord(2, 9.0, 9.0, 9.0),
            coord(1, 1.469, 0.0002, -4.0),
        ];
        let centroid = group_centroid(&snapshot, 1).unwrap();
        assert!((centroid[0] - 1.2345).abs() < 1e-12);
        assert!((centroid[1] - 0.0001).abs() < 1e-12);
        assert_eq!(centroid[2], -3.0);
        assert_eq!(group_centroid(&snapshot, 3), None);
    }

    #[test]
    fn reported_centre_matches_after_rounding() {
        let snapshot = [coord(1, 1.2345, 0.0001, -3.0)];
        let events = [real_event(0, [1.23448, 0.0001, -3.0])];
        assert_eq!(run(&events, &snapshot).verdict, Verdict::Pass);
    }

    #[test]
    fn half_unit_difference_rounds_together() {
        let snapshot = [coord(1, 1.23452, 0.0001, -3.0)];
        let events = [real_event(0, [1.23447, 0.0001, -3.0])];
        assert_eq!(run(&events, &snapshot).verdict, Verdict::Pass);
    }

    #[test]
    fn difference_of_one_rounding_unit_fails() {
        let snapshot = [coord(1, 1.2345, 0.0001, -3.0)];
        let events = [real_event(0, [1.2346, 0.0001, -3.0])];
        let report = run(&events, &snapshot);
        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.fields[0].matched, 0);
        assert_eq!(report.fields[1].matched, 1);
    }

    #[test]
    fn molecules_beyond_the_placements_are_surplus() {
        let snapshot = [
            coord(1, 0.0, 0.0, 0.0),
            coord(2, 1.0, 1.0, 1.0),
            coord(3, 2.0, 2.0, 2.0),
            coord(3, 2.0, 4.0, 2.0),
        ];
        let report = run(&[real_event(0, [0.0; 3])], &snapshot);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.reference_surplus, 2);
    }

    #[test]
    fn group_without_members_mismatches_every_axis() {
        let snapshot = [coord(1, 0.0, 0.0, 0.0)];
        let events = [real_event(0, [0.0; 3]), real_event(1, [1.0; 3])];
        let report = run(&events, &snapshot);
        assert_eq!(report.items[1].reference, None);
        assert!(report.fields.iter().all(|t| t.compared == 2 && t.matched == 1));
    }
}
