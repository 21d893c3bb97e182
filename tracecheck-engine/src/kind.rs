//! Per-kind descriptors: which artifacts to read, how to parse them, and
//! which comparison applies.

use std::path::PathBuf;

use tracecheck_config::{EventKind, TracecheckConfig, DEFAULT_END_MARKER};
use tracecheck_eventlog::{FieldType, LogSchema};
use tracecheck_trace::{BoundaryRule, RecordSchema};

use crate::error::HarnessError;

const BOND_MARKER: &str = "ITEM: ENTRIES index c_bondsinfo[1] c_bondsinfo[2] c_bondsinfo[3]";
const BOND_DUMP: &str = "bonds_full.log";
const ATOM_DUMP: &str = "lammps_full.dat";
const BOND_NUMBERING: BoundaryRule = BoundaryRule::OriginReset { origin: 1 };

/// Comparison applied between the executed events and the reference dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Removed bond must be absent from the snapshot after the event.
    RemovalExistence { boundary: BoundaryRule },
    /// Bonds in order of first appearance must equal the executed formations.
    FormationOrder { boundary: BoundaryRule },
    /// Centroid of molecule `k + 1` must equal the reported placement centre.
    Centroid,
    /// Final positions of atoms of `mobile_type` must equal the reported targets.
    Displacement { mobile_type: i64 },
    /// Identifiers in order of disappearance must equal the executed removals.
    Disappearance { boundary: BoundaryRule },
}

impl Strategy {
    pub fn compared_fields(&self) -> &'static [&'static str] {
        match self {
            Strategy::RemovalExistence { .. } => &["bond_absent"],
            Strategy::FormationOrder { .. } => &["bond_type", "atom1_id", "atom2_id"],
            Strategy::Centroid | Strategy::Displacement { .. } => &["x", "y", "z"],
            Strategy::Disappearance { .. } => &["atom_id"],
        }
    }
}

#[derive(Debug, Clone)]
pub struct KindDescriptor {
    pub kind: EventKind,
    pub reference_file: PathBuf,
    pub start_marker: String,
    pub end_marker: String,
    pub schema: RecordSchema,
    pub log: LogSchema,
    pub strategy: Strategy,
}

impl KindDescriptor {
    /// Layout produced by the reference tooling for `kind`.
    pub fn builtin(kind: EventKind) -> Self {
        fn bond_fields(names: [&str; 3]) -> [(&str, FieldType); 3] {
            names.map(|n| (n, FieldType::Int))
        }

        let (reference_file, start_marker, schema, log, strategy) = match kind {
            EventKind::BondFormation => (
                BOND_DUMP,
                BOND_MARKER,
                RecordSchema::Bond,
                LogSchema::named(
                    "Executing bond formation event",
                    &bond_fields(["BOND_TYPE", "ATOM1_ID", "ATOM2_ID"]),
                ),
                Strategy::FormationOrder {
                    boundary: BOND_NUMBERING,
                },
            ),
            EventKind::BondBreak => (
                BOND_DUMP,
                BOND_MARKER,
                RecordSchema::Bond,
                LogSchema::named(
                    "Executing bond break event",
                    &bond_fields(["bond_type", "atom1_id", "atom2_id"]),
                ),
                Strategy::RemovalExistence {
                    boundary: BOND_NUMBERING,
                },
            ),
            EventKind::Deposition => (
                ATOM_DUMP,
                "ITEM: ATOMS mol xu yu zu",
                RecordSchema::Coord,
                LogSchema::trailing("Executing deposition event", &["x", "y", "z"]),
                Strategy::Centroid,
            ),
            EventKind::Diffusion => (
                ATOM_DUMP,
                "ITEM: ATOMS type xu yu zu",
                RecordSchema::Coord,
                LogSchema::trailing("Executing diffusion event", &["x", "y", "z"]),
                Strategy::Displacement { mobile_type: 2 },
            ),
            EventKind::MonoDesorption => (
                ATOM_DUMP,
                "ITEM: ATOMS id",
                RecordSchema::Id,
                LogSchema::named(
                    "Executing monoatomic desorption event",
                    &[("ATOM_ID", FieldType::Int)],
                ),
                Strategy::Disappearance {
                    boundary: BoundaryRule::Descending,
                },
            ),
        };

        Self {
            kind,
            reference_file: PathBuf::from(reference_file),
            start_marker: start_marker.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            schema,
            log,
            strategy,
        }
    }

    /// Built-in layout with configured overrides applied.
    pub fn from_config(config: &TracecheckConfig) -> Result<Self, HarnessError> {
        let kind = config.kind.ok_or(HarnessError::MissingKind)?;
        let mut descriptor = Self::builtin(kind);

        if let Some(file) = &config.trace.reference_file {
            descriptor.reference_file = file.clone();
        }
        if let Some(marker) = &config.trace.start_marker {
            descriptor.start_marker = marker.clone();
        }
        descriptor.end_marker = config.trace.end_marker.clone();
        if let Some(prefix) = &config.event_log.prefix {
            descriptor.log = descriptor.log.with_prefix(prefix.clone());
        }
        if let Strategy::Displacement { mobile_type } = &mut descriptor.strategy {
            *mobile_type = config.trace.mobile_type;
        }

        Ok(descriptor)
    }
}
