//! # tracecheck Reference Trace Parsing
//!
//! Crate for reading the reference engine's trajectory dumps: marker-bounded
//! block extraction, typed record parsing and snapshot reconstruction.

pub mod error;
pub mod record;
pub mod reference;
pub mod round;
pub mod segment;
pub mod timestep;

pub use error::TraceError;
pub use record::{BondRecord, CoordRecord, EntityRecord, IdRecord, RecordSchema};
pub use reference::ReferenceTrace;
pub use round::{round_point, round_to};
pub use segment::{SourceLine, TraceSegment};
pub use timestep::{aggregate, BoundaryRule, Timestep};
