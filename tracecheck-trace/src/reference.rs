//! A loaded reference dump and the views comparators take of it.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::TraceError;
use crate::record::{parse_records, EntityRecord, RecordSchema};
use crate::segment::{captured_lines, extract_segments, TraceSegment};
use crate::timestep::{aggregate, BoundaryRule, Timestep};

/// Marker-bounded blocks of one dump, all sharing a record schema.
#[derive(Debug, Clone)]
pub struct ReferenceTrace {
    path: PathBuf,
    schema: RecordSchema,
    segments: Vec<TraceSegment>,
}

impl ReferenceTrace {
    /// Read the dump and check that the start marker captured at least one line.
    #[instrument(level = "debug", skip(start_marker, end_marker), fields(path = %path.display()))]
    pub fn load(
        path: &Path,
        schema: RecordSchema,
        start_marker: &str,
        end_marker: &str,
    ) -> Result<Self, TraceError> {
        let segments = extract_segments(path, start_marker, end_marker)?;
        Self::from_segments(path, schema, start_marker, segments)
    }

    pub fn from_segments(
        path: &Path,
        schema: RecordSchema,
        start_marker: &str,
        segments: Vec<TraceSegment>,
    ) -> Result<Self, TraceError> {
        if segments.iter().all(TraceSegment::is_empty) {
            return Err(TraceError::EmptyReference {
                marker: start_marker.to_string(),
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            schema,
            segments,
        })
    }

    pub fn segments(&self) -> &[TraceSegment] {
        &self.segments
    }

    /// Every captured record in file order.
    pub fn records(&self) -> Result<Vec<EntityRecord>, TraceError> {
        parse_records(self.schema, captured_lines(&self.segments))
    }

    /// Snapshots reconstructed from the flat record stream.
    pub fn timesteps(&self, rule: BoundaryRule) -> Result<Vec<Timestep>, TraceError> {
        let steps = aggregate(self.records()?, rule);
        debug!(
            path = %self.path.display(),
            timesteps = steps.len(),
            "Reconstructed reference snapshots"
        );
        Ok(steps)
    }

    /// Records of the last non-empty block.
    pub fn final_snapshot(&self) -> Result<Vec<EntityRecord>, TraceError> {
        let last = self
            .segments
            .iter()
            .rev()
            .find(|s| !s.is_empty())
            .map(|s| s.lines.iter())
            .into_iter()
            .flatten();
        parse_records(self.schema, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::extract_segments_from_reader;

    const START: &str = "ITEM: ATOMS mol xu yu zu";
    const END: &str = "ITEM: TIMESTEP";

    fn trace(dump: &str) -> Result<ReferenceTrace, TraceError> {
        let segments = extract_segments_from_reader(dump.as_bytes(), START, END).unwrap();
        ReferenceTrace::from_segments(Path::new("lammps_full.dat"), RecordSchema::Coord, START, segments)
    }

    #[test]
    fn final_snapshot_is_last_block() {
        let dump = format!(
            "{END}\n0\n{START}\n0 0.0 0.0 0.0\n{END}\n100\n{START}\n0 0.0 0.0 0.0\n1 1.0 2.0 3.0\n"
        );
        let reference = trace(&dump).unwrap();
        let last = reference.final_snapshot().unwrap();
        assert_eq!(last.len(), 2);
        assert_eq!(reference.records().unwrap().len(), 3);
    }

    #[test]
    fn marker_without_records_is_empty_reference() {
        let dump = format!("{END}\n0\n{START}\n{END}\n");
        assert!(matches!(trace(&dump), Err(TraceError::EmptyReference { .. })));
        assert!(matches!(trace("nothing here\n"), Err(TraceError::EmptyReference { .. })));
    }
}
