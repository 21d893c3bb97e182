//! ## tracecheck-eventlog::reader
//! Extraction of committed actions from the engine's execution log.
//!
//! File order is commit order. An announcement that lacks one of the schema's
//! fields is skipped and recorded in [`EventLog::skipped`]; it never aborts
//! the scan.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::EventLogError;
use crate::schema::{FieldSource, FieldType, LogSchema};

const NUMBER: &str = r"[-+]?(?:\d*\.\d+|\d+)(?:[eE][-+]?\d+)?";

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(NUMBER).expect("numeric token pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Int(i64),
    Real(f64),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            FieldValue::Int(v) => Some(v),
            FieldValue::Real(_) => None,
        }
    }

    pub fn as_real(&self) -> f64 {
        match *self {
            FieldValue::Int(v) => v as f64,
            FieldValue::Real(v) => v,
        }
    }
}

/// One action the engine reports having committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedEvent {
    /// 0-based position in commit order.
    pub ordinal: usize,
    /// 1-based line in the execution log.
    pub line: usize,
    /// Values in schema field order.
    pub values: Vec<FieldValue>,
}

impl ExecutedEvent {
    pub fn int(&self, field: usize) -> Option<i64> {
        self.values.get(field).and_then(FieldValue::as_int)
    }

    pub fn real(&self, field: usize) -> Option<f64> {
        self.values.get(field).map(FieldValue::as_real)
    }
}

/// Announcement that matched the prefix but not the field schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub line: usize,
    pub text: String,
    pub missing: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<ExecutedEvent>,
    pub skipped: Vec<SkippedLine>,
}

enum Extractor {
    Named(Regex),
    FromEnd(usize),
}

pub struct EventLogReader {
    schema: LogSchema,
    extractors: Vec<(FieldType, Extractor)>,
}

impl EventLogReader {
    pub fn new(schema: LogSchema) -> Result<Self, EventLogError> {
        let extractors = schema
            .fields
            .iter()
            .map(|field| {
                let extractor = match &field.source {
                    FieldSource::Named(key) => {
                        let pattern = format!(r"\b{}\s*=\s*({NUMBER})", regex::escape(key));
                        let regex = Regex::new(&pattern).map_err(|source| EventLogError::Pattern {
                            field: field.name.clone(),
                            source,
                        })?;
                        Extractor::Named(regex)
                    }
                    FieldSource::FromEnd(n) => Extractor::FromEnd(*n),
                };
                Ok((field.ty, extractor))
            })
            .collect::<Result<Vec<_>, EventLogError>>()?;

        Ok(Self { schema, extractors })
    }

    /// Scan the execution log at `path`.
    #[instrument(level = "debug", skip(self), fields(path = %path.display()))]
    pub fn read_path(&self, path: &Path) -> Result<EventLog, EventLogError> {
        if !path.exists() {
            return Err(EventLogError::FileNotFound(path.to_path_buf()));
        }
        let io_err = |source| EventLogError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        self.read(BufReader::new(file)).map_err(io_err)
    }

    /// Scan buffered log input.
    pub fn read<R: BufRead>(&self, reader: R) -> std::io::Result<EventLog> {
        let mut log = EventLog::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if !self.schema.announces(&line) {
                continue;
            }
            let number = idx + 1;
            match self.extract(&line) {
                Ok(values) => log.events.push(ExecutedEvent {
                    ordinal: log.events.len(),
                    line: number,
                    values,
                }),
                Err(missing) => {
                    warn!(line = number, field = %missing, "Skipping event announcement without required field");
                    log.skipped.push(SkippedLine {
                        line: number,
                        text: line.trim().to_string(),
                        missing,
                    });
                }
            }
        }
        debug!(
            events = log.events.len(),
            skipped = log.skipped.len(),
            "Read execution log"
        );
        Ok(log)
    }

    fn extract(&self, line: &str) -> Result<Vec<FieldValue>, String> {
        let numbers: Vec<&str> = NUMERIC_TOKEN.find_iter(line).map(|m| m.as_str()).collect();

        self.extractors
            .iter()
            .zip(&self.schema.fields)
            .map(|((ty, extractor), field)| {
                let raw = match extractor {
                    Extractor::Named(regex) => regex
                        .captures(line)
                        .and_then(|c| c.get(1))
                        .map(|m| m.as_str()),
                    Extractor::FromEnd(n) => numbers
                        .len()
                        .checked_sub(*n)
                        .and_then(|i| numbers.get(i).copied()),
                };
                raw.and_then(|raw| convert(*ty, raw))
                    .ok_or_else(|| field.name.clone())
            })
            .collect()
    }
}

fn convert(ty: FieldType, raw: &str) -> Option<FieldValue> {
    match ty {
        FieldType::Int => raw.parse::<i64>().ok().map(FieldValue::Int),
        FieldType::Real => raw.parse::<f64>().ok().map(FieldValue::Real),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn formation_reader() -> EventLogReader {
        EventLogReader::new(LogSchema::named(
            "Executing bond formation event",
            &[
                ("BOND_TYPE", FieldType::Int),
                ("ATOM1_ID", FieldType::Int),
                ("ATOM2_ID", FieldType::Int),
            ],
        ))
        .unwrap()
    }

    #[test]
    fn named_fields_in_commit_order() {
        let log = "\
~~~~~~~~~~~~~~~~EVENTS INFO~~~~~~~~~~~~~~~~
 Executing bond formation event from proc 0, BOND_TYPE=2 , ATOM1_ID=10 , ATOM2_ID=11
~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
 Executing bond formation event from proc 3, BOND_TYPE=1 , ATOM1_ID=4 , ATOM2_ID=7
";
        let parsed = formation_reader().read(log.as_bytes()).unwrap();
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.events[0].values, vec![
            FieldValue::Int(2),
            FieldValue::Int(10),
            FieldValue::Int(11)
        ]);
        assert_eq!(parsed.events[1].ordinal, 1);
        assert_eq!(parsed.events[1].line, 4);
        assert_eq!(parsed.events[1].int(2), Some(7));
    }

    #[test]
    fn spaced_assignment_is_accepted() {
        let reader = EventLogReader::new(LogSchema::named(
            "Executing bond break event",
            &[
                ("bond_type", FieldType::Int),
                ("atom1_id", FieldType::Int),
                ("atom2_id", FieldType::Int),
            ],
        ))
        .unwrap();
        let log = " Executing bond break event from proc 1, bond_type=3 , atom1_id = 5 , atom2_id = 6 \n";
        let parsed = reader.read(log.as_bytes()).unwrap();
        assert_eq!(parsed.events[0].int(0), Some(3));
        assert_eq!(parsed.events[0].int(1), Some(5));
        assert_eq!(parsed.events[0].int(2), Some(6));
    }

    #[test]
    fn trailing_numbers_taken_left_to_right() {
        let reader = EventLogReader::new(LogSchema::trailing(
            "Executing deposition event",
            &["x", "y", "z"],
        ))
        .unwrap();
        let log = " Executing deposition event from proc 0, MOL_NAME=H2O center_pos=(1.234500,0.000100,-3.000000) \n";
        let parsed = reader.read(log.as_bytes()).unwrap();
        let event = &parsed.events[0];
        assert_eq!(event.real(0), Some(1.2345));
        assert_eq!(event.real(1), Some(0.0001));
        assert_eq!(event.real(2), Some(-3.0));
    }

    #[traced_test]
    #[test]
    fn incomplete_announcement_is_skipped_and_counted() {
        let log = "\
 Executing bond formation event from proc 0, BOND_TYPE=2 , ATOM1_ID=10
 Executing bond formation event from proc 0, BOND_TYPE=2 , ATOM1_ID=10 , ATOM2_ID=12
";
        let parsed = formation_reader().read(log.as_bytes()).unwrap();
        assert_eq!(parsed.events.len(), 1);
        assert_eq!(parsed.events[0].ordinal, 0);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].line, 1);
        assert_eq!(parsed.skipped[0].missing, "ATOM2_ID");
        assert!(logs_contain("Skipping event announcement"));
    }

    #[test]
    fn non_integer_id_counts_as_missing() {
        let log = " Executing bond formation event BOND_TYPE=2 ATOM1_ID=1.5 ATOM2_ID=3\n";
        let parsed = formation_reader().read(log.as_bytes()).unwrap();
        assert!(parsed.events.is_empty());
        assert_eq!(parsed.skipped[0].missing, "ATOM1_ID");
    }

    #[test]
    fn reads_log_from_disk() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "LAMMPS (2 Aug 2023)").unwrap();
        writeln!(
            file,
            " Executing bond formation event from proc 1, BOND_TYPE=1 , ATOM1_ID=4 , ATOM2_ID=9"
        )
        .unwrap();

        let parsed = formation_reader().read_path(file.path()).unwrap();
        assert_eq!(parsed.events.len(), 1);
        assert_eq!(parsed.events[0].line, 2);
        assert_eq!(parsed.events[0].int(2), Some(9));
    }

    #[test]
    fn missing_log_file() {
        let err = formation_reader()
            .read_path(Path::new("no/such/papreca_full.log"))
            .unwrap_err();
        assert!(matches!(err, EventLogError::FileNotFound(_)));
    }
}
