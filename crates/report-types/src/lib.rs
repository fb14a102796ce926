//! Shared data types for the lab reporting stack.
//!
//! These are the records that cross crate boundaries: the patient data a
//! report is generated for, the status the persistence layer tracks, and the
//! wire form of template placements.

pub mod patient;
pub mod report;

pub use patient::PatientRecord;
pub use report::{PlacementRecord, ReportStatus};
