//! Bond break: the removed bond must be gone from the following snapshot.

use tracecheck_eventlog::ExecutedEvent;
use tracecheck_trace::Timestep;

use super::BondEvent;
use crate::error::HarnessError;
use crate::report::ReportAggregator;

/// Whether `step` still lists a bond of the same type between the same atoms.
pub fn still_bonded(step: &Timestep, bond: &BondEvent) -> bool {
    step.records
        .iter()
        .filter_map(|r| r.as_bond())
        .any(|b| b.bond_type == bond.bond_type && b.unordered_pair() == bond.unordered_pair())
}

/// Event `k` is checked against snapshot `k + 1`.
///
/// A dump whose last snapshot has no bonds left loses that snapshot during
/// reconstruction, so the final removal may be checked against an implicit
/// empty snapshot when exactly that one is missing.
pub fn compare(
    events: &[ExecutedEvent],
    timesteps: &[Timestep],
    report: &mut ReportAggregator,
) -> Result<(), HarnessError> {
    for (k, event) in events.iter().enumerate() {
        let bond = BondEvent::from_event(event)?;
        let next = k + 1;

        match timesteps.get(next) {
            Some(step) => {
                let absent = !still_bonded(step, &bond);
                let seen = if absent {
                    format!("absent from snapshot {next} ({} bonds)", step.len())
                } else {
                    format!("still present in snapshot {next}")
                };
                report.record(k, bond, seen, &[absent]);
            }
            None if next == timesteps.len() && next == events.len() => {
                report.record(k, bond, format!("absent from snapshot {next} (empty)"), &[true]);
            }
            None => report.record_missing(k, bond),
        }
    }

    let implied = events.len() + 1;
    report.reference_surplus(timesteps.len().saturating_sub(implied));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::fixtures::{bond_steps, int_event};
    use crate::report::Verdict;
    use tracecheck_config::EventKind;

    fn run(events: &[ExecutedEvent], steps: &[Timestep]) -> crate::report::ComparisonReport {
        let mut report = ReportAggregator::new(EventKind::BondBreak, &["bond_absent"]);
        compare(events, steps, &mut report).unwrap();
        report.finish()
    }

    #[test]
    fn event_is_checked_against_the_following_snapshot() {
        let steps = bond_steps(&[
            &[(1, 1, 2), (1, 3, 4), (2, 5, 6)],
            &[(1, 1, 2), (2, 5, 6)],
            &[(2, 5, 6)],
        ]);
        let events = [int_event(0, &[1, 3, 4]), int_event(1, &[1, 2, 1])];
        let report = run(&events, &steps);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.fields[0].matched, 2);
    }

    #[test]
    fn bond_still_listed_after_removal_fails() {
        let steps = bond_steps(&[&[(1, 1, 2), (1, 3, 4)], &[(1, 3, 4)]]);
        let events = [int_event(0, &[1, 3, 4])];
        let report = run(&events, &steps);
        assert_eq!(report.verdict, Verdict::Fail);
        assert!(report.items[0]
            .reference
            .as_deref()
            .unwrap()
            .contains("still present in snapshot 1"));
    }

    #[test]
    fn bond_type_is_part_of_identity() {
        let steps = bond_steps(&[&[(1, 3, 4), (2, 3, 4)], &[(2, 3, 4)]]);
        let events = [int_event(0, &[1, 4, 3])];
        assert_eq!(run(&events, &steps).verdict, Verdict::Pass);
    }

    #[test]
    fn single_missing_trailing_snapshot_is_empty() {
        let steps = bond_steps(&[&[(1, 1, 2), (1, 3, 4)], &[(1, 1, 2)]]);
        let events = [int_event(0, &[1, 3, 4]), int_event(1, &[1, 1, 2])];
        let report = run(&events, &steps);
        assert_eq!(report.verdict, Verdict::Pass);
        assert!(report.items[1].reference.as_deref().unwrap().contains("(empty)"));
    }

    #[test]
    fn further_missing_snapshots_are_mismatches() {
        let steps = bond_steps(&[&[(1, 1, 2), (1, 3, 4)]]);
        let events = [int_event(0, &[1, 3, 4]), int_event(1, &[1, 1, 2])];
        let report = run(&events, &steps);
        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.items[1].reference, None);
    }

    #[test]
    fn only_the_final_removal_sees_the_implicit_empty_snapshot() {
        let steps = bond_steps(&[&[(1, 12, 34), (1, 34, 56)], &[(1, 12, 34)]]);
        let events = [
            int_event(0, &[1, 34, 56]),
            int_event(1, &[1, 12, 34]),
            int_event(2, &[1, 12, 34]),
        ];
        let report = run(&events, &steps);
        assert_eq!(report.fields[0].matched, 1);
        assert_eq!(report.fields[0].compared, 3);
        assert_eq!(report.items[1].reference, None);
        assert!(!report.items[1].matched);
    }

    #[test]
    fn extra_snapshots_are_surplus() {
        let steps = bond_steps(&[&[(1, 1, 2), (1, 3, 4)], &[(1, 1, 2)], &[(1, 1, 2)], &[(1, 1, 2)]]);
        let report = run(&[int_event(0, &[1, 3, 4])], &steps);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.reference_surplus, 2);
    }
}
