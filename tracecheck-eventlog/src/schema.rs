//! ## tracecheck-eventlog::schema
//! Declarative description of what an event announcement carries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Int,
    Real,
}

/// Where a field's value sits on the announcement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSource {
    /// `KEY=value` or `KEY = value`, matched case-sensitively.
    Named(String),
    /// The n-th numeric token counted from the end of the line, 1-based.
    FromEnd(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogField {
    pub name: String,
    pub ty: FieldType,
    pub source: FieldSource,
}

/// Prefix plus ordered fields of one event kind's announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSchema {
    pub prefix: String,
    pub fields: Vec<LogField>,
}

impl LogSchema {
    /// Fields given as `KEY=value` pairs; the field name is the key.
    pub fn named(prefix: impl Into<String>, fields: &[(&str, FieldType)]) -> Self {
        Self {
            prefix: prefix.into(),
            fields: fields
                .iter()
                .map(|&(key, ty)| LogField {
                    name: key.to_string(),
                    ty,
                    source: FieldSource::Named(key.to_string()),
                })
                .collect(),
        }
    }

    /// Real-valued fields taken from the last `names.len()` numeric tokens, left to right.
    pub fn trailing(prefix: impl Into<String>, names: &[&str]) -> Self {
        let count = names.len();
        Self {
            prefix: prefix.into(),
            fields: names
                .iter()
                .enumerate()
                .map(|(i, name)| LogField {
                    name: name.to_string(),
                    ty: FieldType::Real,
                    source: FieldSource::FromEnd(count - i),
                })
                .collect(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Whether `line` announces an event of this kind.
    pub fn announces(&self, line: &str) -> bool {
        line.trim_start().starts_with(&self.prefix)
    }
}
