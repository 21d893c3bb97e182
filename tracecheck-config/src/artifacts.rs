//! Locations and layout of the two artifacts being compared.
//!
//! Everything left as `None` falls back to the built-in descriptor of the
//! configured event kind.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

pub const DEFAULT_PRECISION: u32 = 4;
pub const DEFAULT_END_MARKER: &str = "ITEM: TIMESTEP";

/// Reference trajectory dump settings.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TraceConfig {
    /// Dump file name, relative to the working directory.
    #[validate(custom(function = validation::validate_file_path))]
    pub reference_file: Option<PathBuf>,

    /// Header line that opens a block of records.
    #[validate(custom(function = validation::validate_marker))]
    pub start_marker: Option<String>,

    /// Line that closes a block of records.
    #[serde(default = "default_end_marker")]
    #[validate(custom(function = validation::validate_marker))]
    pub end_marker: String,

    /// Decimal digits kept before comparing floating-point values.
    #[serde(default = "default_precision")]
    #[validate(range(max = 12))]
    pub precision: u32,

    /// Atom type whose coordinates are checked for diffusion events.
    #[serde(default = "default_mobile_type")]
    pub mobile_type: i64,
}

fn default_end_marker() -> String {
    DEFAULT_END_MARKER.into()
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

fn default_mobile_type() -> i64 {
    2
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            reference_file: None,
            start_marker: None,
            end_marker: default_end_marker(),
            precision: default_precision(),
            mobile_type: default_mobile_type(),
        }
    }
}

/// Execution log settings.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct EventLogConfig {
    /// File receiving the engine's standard output.
    #[serde(default = "default_log_file")]
    #[validate(custom(function = validation::validate_file_path))]
    pub file: PathBuf,

    /// Literal that opens an event announcement line.
    #[validate(custom(function = validation::validate_prefix))]
    pub prefix: Option<String>,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("papreca_full.log")
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            prefix: None,
        }
    }
}

/// Report output settings.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct ReportConfig {
    /// Print one SUT/reference line pair per compared item.
    #[serde(default = "default_true")]
    pub step_summary: bool,

    /// Also write the report as YAML to this path.
    #[validate(custom(function = validation::validate_file_path))]
    pub path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            step_summary: default_true(),
            path: None,
        }
    }
}
