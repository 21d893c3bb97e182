//! # tracecheck Execution Log Reader
//!
//! Crate for pulling committed actions, in commit order, out of the system
//! under test's plain-text execution log.

pub mod error;
pub mod reader;
pub mod schema;

pub use error::EventLogError;
pub use reader::{EventLog, EventLogReader, ExecutedEvent, FieldValue, SkippedLine};
pub use schema::{FieldSource, FieldType, LogField, LogSchema};
