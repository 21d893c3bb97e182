//! # tracecheck Conformance Engine
//!
//! Crate tying the reference trace and the execution log together: per-kind
//! descriptors, the differential comparison strategies, report aggregation
//! and the launch harness.

pub mod compare;
pub mod error;
pub mod harness;
pub mod kind;
pub mod report;

pub use compare::compare;
pub use error::HarnessError;
pub use harness::Harness;
pub use kind::{KindDescriptor, Strategy};
pub use report::{ComparisonReport, FieldTally, ItemDiagnostic, ReportAggregator, Verdict};
