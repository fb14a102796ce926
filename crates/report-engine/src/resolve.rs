//! Placement-to-text resolution.
//!
//! Turns a template, a patient record, and the user-entered custom values
//! into the text the stamper draws. Resolution is total: every placement
//! yields some string, with missing custom values degrading to blank rather
//! than aborting the whole document.

use crate::template::{Placement, TemplateDocument};
use chrono::{Local, NaiveDate};
use report_types::PatientRecord;
use std::collections::HashMap;

/// Format used for the `{{date}}` token.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// The text chosen for one placement.
///
/// Ephemeral: produced per report completion and consumed by the stamper,
/// never persisted on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlacement {
    pub placement: Placement,
    pub text: String,
}

/// Resolve every placement on `template`, in insertion order.
///
/// Reserved tokens derive from `patient`; age renders as a plain decimal
/// and the registration number verbatim. `{{date}}` renders `today` and is
/// the sole clock-dependent token, which is why the date is a parameter:
/// given the same inputs and the same calendar day the output is identical.
/// Non-reserved tokens look up `custom` by their full delimited text,
/// defaulting to the empty string when absent.
pub fn resolve(
    template: &TemplateDocument,
    patient: &PatientRecord,
    custom: &HashMap<String, String>,
    today: NaiveDate,
) -> Vec<ResolvedPlacement> {
    template
        .placements()
        .iter()
        .map(|placement| {
            let text = if placement.token.is_reserved() {
                match placement.token.inner_name() {
                    "name" => patient.name.clone(),
                    "age" => patient.age.to_string(),
                    "sex" => patient.sex.clone(),
                    "date" => today.format(DATE_FORMAT).to_string(),
                    "regd_no" => patient.regd_no.clone(),
                    _ => unreachable!("reserved set is fixed"),
                }
            } else {
                custom
                    .get(placement.token.as_str())
                    .cloned()
                    .unwrap_or_default()
            };
            ResolvedPlacement {
                placement: placement.clone(),
                text,
            }
        })
        .collect()
}

/// [`resolve`] against the local calendar day.
pub fn resolve_now(
    template: &TemplateDocument,
    patient: &PatientRecord,
    custom: &HashMap<String, String>,
) -> Vec<ResolvedPlacement> {
    resolve(template, patient, custom, Local::now().date_naive())
}
