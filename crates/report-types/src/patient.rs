use serde::{Deserialize, Serialize};

/// A registered patient, as stored by the persistence layer.
///
/// This is the explicit shape of the loosely-typed patient objects the
/// engine consumes; external data is deserialized into it at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub age: u32,
    pub sex: String,
    /// Zero-padded four-digit registration number, e.g. "0007".
    pub regd_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}
