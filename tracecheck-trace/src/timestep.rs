//! ## tracecheck-trace::timestep
//! Reconstruction of per-snapshot record groups from a flat record stream.
//!
//! Dumps do not mark where one snapshot's records end once the header lines
//! are stripped, so boundaries are inferred from the leading numeric field:
//! record numbering restarts at every snapshot.

use serde::{Deserialize, Serialize};

use crate::record::EntityRecord;

/// When the leading field of the next record starts a new snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryRule {
    /// Numbering restarts: the next field equals `origin` or is smaller than the current one.
    OriginReset { origin: i64 },
    /// Sorted identifiers: the next field is smaller than the current one.
    Descending,
}

impl BoundaryRule {
    pub fn is_reset(&self, current: i64, next: i64) -> bool {
        match *self {
            BoundaryRule::OriginReset { origin } => next == origin || next < current,
            BoundaryRule::Descending => next < current,
        }
    }
}

/// Records valid as of one reference snapshot. Index 0 is the pre-event baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timestep {
    pub index: usize,
    pub records: Vec<EntityRecord>,
}

impl Timestep {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Default)]
struct TimestepBuilder {
    done: Vec<Timestep>,
    pending: Vec<EntityRecord>,
}

impl TimestepBuilder {
    fn push(mut self, record: EntityRecord, closes: bool) -> Self {
        self.pending.push(record);
        if closes {
            let records = std::mem::take(&mut self.pending);
            self.done.push(Timestep {
                index: self.done.len(),
                records,
            });
        }
        self
    }

    fn finish(self) -> Vec<Timestep> {
        self.done
    }
}

/// Group `records` into snapshots. The last record always closes the current snapshot.
pub fn aggregate(records: Vec<EntityRecord>, rule: BoundaryRule) -> Vec<Timestep> {
    let leading: Vec<i64> = records.iter().map(EntityRecord::leading_field).collect();

    records
        .into_iter()
        .enumerate()
        .fold(TimestepBuilder::default(), |builder, (i, record)| {
            let closes = leading
                .get(i + 1)
                .map_or(true, |&next| rule.is_reset(leading[i], next));
            builder.push(record, closes)
        })
        .finish()
}
