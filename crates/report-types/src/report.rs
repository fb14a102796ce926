use serde::{Deserialize, Serialize};

/// Lifecycle of a report row.
///
/// Stamping failures must leave the report `Pending` so the completion can
/// be retried; only a successfully uploaded artifact flips it to
/// `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Completed,
}

/// Serialized form of one template placement.
///
/// `text` holds the full delimited token (e.g. `{{name}}`); coordinates are
/// top-down offsets from the page's top-left corner. Placements are saved
/// together as one array, matching the stored template row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub text: String,
    pub page: u32,
    pub x: f64,
    pub y: f64,
}
