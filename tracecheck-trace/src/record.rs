//! ## tracecheck-trace::record
//! Typed records parsed from captured dump lines.
//!
//! Every schema has a fixed field count and order; a line that does not fit
//! is a parse error for the whole run.
//!
//! This parser uses nom version 8 for zero‑copy token parsing.

use nom::{
    character::complete::{digit1, multispace1, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    number::complete::double,
    sequence::preceded,
    IResult, Parser,
};
use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::segment::SourceLine;

/// Field layout of one block type in the reference dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSchema {
    /// `index bond_type atom1 atom2`
    Bond,
    /// `entity x y z`
    Coord,
    /// `id`
    Id,
}

impl RecordSchema {
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            RecordSchema::Bond => &["index", "bond_type", "atom1_id", "atom2_id"],
            RecordSchema::Coord => &["entity", "x", "y", "z"],
            RecordSchema::Id => &["id"],
        }
    }

    pub fn field_count(&self) -> usize {
        self.field_names().len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BondRecord {
    pub index: i64,
    pub bond_type: i64,
    pub atom1_id: i64,
    pub atom2_id: i64,
}

impl BondRecord {
    /// Atom pair with the smaller id first.
    pub fn unordered_pair(&self) -> (i64, i64) {
        if self.atom1_id <= self.atom2_id {
            (self.atom1_id, self.atom2_id)
        } else {
            (self.atom2_id, self.atom1_id)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordRecord {
    pub entity_id: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdRecord {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityRecord {
    Bond(BondRecord),
    Coord(CoordRecord),
    Id(IdRecord),
}

impl EntityRecord {
    /// First numeric field on the line; drives timestep boundary detection.
    pub fn leading_field(&self) -> i64 {
        match self {
            EntityRecord::Bond(b) => b.index,
            EntityRecord::Coord(c) => c.entity_id,
            EntityRecord::Id(i) => i.id,
        }
    }

    pub fn as_bond(&self) -> Option<&BondRecord> {
        match self {
            EntityRecord::Bond(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_coord(&self) -> Option<&CoordRecord> {
        match self {
            EntityRecord::Coord(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&IdRecord> {
        match self {
            EntityRecord::Id(i) => Some(i),
            _ => None,
        }
    }
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize((opt(one_of("+-")), digit1)), |s: &str| {
        s.parse::<i64>()
    })
    .parse(input)
}

fn real(input: &str) -> IResult<&str, f64> {
    double(input)
}

fn bond_line(input: &str) -> IResult<&str, EntityRecord> {
    all_consuming((
        integer,
        preceded(multispace1, integer),
        preceded(multispace1, integer),
        preceded(multispace1, integer),
    ))
    .map(|(index, bond_type, atom1_id, atom2_id)| {
        EntityRecord::Bond(BondRecord {
            index,
            bond_type,
            atom1_id,
            atom2_id,
        })
    })
    .parse(input)
}

fn coord_line(input: &str) -> IResult<&str, EntityRecord> {
    all_consuming((
        integer,
        preceded(multispace1, real),
        preceded(multispace1, real),
        preceded(multispace1, real),
    ))
    .map(|(entity_id, x, y, z)| EntityRecord::Coord(CoordRecord { entity_id, x, y, z }))
    .parse(input)
}

fn id_line(input: &str) -> IResult<&str, EntityRecord> {
    all_consuming(integer)
        .map(|id| EntityRecord::Id(IdRecord { id }))
        .parse(input)
}

/// Parse one captured line against `schema`.
pub fn parse_record(schema: RecordSchema, line: &SourceLine) -> Result<EntityRecord, TraceError> {
    let found = line.text.split_whitespace().count();
    if found != schema.field_count() {
        return Err(TraceError::Parse {
            line: line.number,
            text: line.text.clone(),
            reason: format!("expected {} fields, found {}", schema.field_count(), found),
        });
    }

    let parsed = match schema {
        RecordSchema::Bond => bond_line(&line.text),
        RecordSchema::Coord => coord_line(&line.text),
        RecordSchema::Id => id_line(&line.text),
    };
    parsed
        .map(|(_, record)| record)
        .map_err(|_| TraceError::Parse {
            line: line.number,
            text: line.text.clone(),
            reason: format!(
                "fields do not match {:?}",
                schema.field_names()
            ),
        })
}

/// Parse every line; the first malformed line aborts.
pub fn parse_records<'a, I>(schema: RecordSchema, lines: I) -> Result<Vec<EntityRecord>, TraceError>
where
    I: IntoIterator<Item = &'a SourceLine>,
{
    lines
        .into_iter()
        .map(|line| parse_record(schema, line))
        .collect()
}
