//! Placeholder template engine for pathology lab reports.
//!
//! A test template is a PDF plus a list of placements: delimited tokens
//! (`{{name}}`, `{{result_cbc}}`) pinned to page coordinates. At report
//! completion time each placement is resolved to text from the patient
//! record or the technician's entered values, and the text is stamped onto
//! the pages to produce the final artifact.
//!
//! The engine performs no I/O and holds no ambient state: document bytes,
//! the patient record, and custom values all arrive as explicit inputs, and
//! the stamped bytes leave as an explicit output for the caller to upload.

pub mod catalog;
pub mod error;
pub mod resolve;
pub mod stamp;
pub mod template;

pub use catalog::{scan_tokens, PlaceholderToken, CLOSE_DELIM, OPEN_DELIM, RESERVED_NAMES};
pub use error::ReportError;
pub use resolve::{resolve, resolve_now, ResolvedPlacement};
pub use stamp::stamp;
pub use template::{Placement, PlacementId, TemplateDocument};

/// Parse PDF bytes and return the page count.
pub fn get_page_count(bytes: &[u8]) -> Result<u32, ReportError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| ReportError::UnreadableDocument(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use lopdf::{dictionary, Dictionary, Document, Object, Stream};
    use proptest::prelude::*;
    use report_types::PatientRecord;
    use std::collections::HashMap;

    fn single_page_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"BT ET".to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => Object::Reference(content_id),
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => 1,
            "Kids" => vec![Object::Reference(page_id)],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    /// Strategy for inner names that are non-empty after trimming.
    fn inner_name() -> impl Strategy<Value = String> {
        "[a-zA-Z_][a-zA-Z0-9_ ]{0,30}".prop_map(|s| s.to_string())
    }

    fn patient() -> impl Strategy<Value = PatientRecord> {
        (
            "[A-Za-z ]{1,40}",
            0u32..130,
            prop_oneof![Just("female".to_string()), Just("male".to_string())],
            1u32..=1000,
        )
            .prop_map(|(name, age, sex, regd)| PatientRecord {
                name,
                age,
                sex,
                regd_no: format!("{:04}", regd),
                contact: None,
            })
    }

    proptest! {
        /// Property: any delimited marker with a non-empty inner name
        /// validates, and the inner name survives delimiter stripping.
        #[test]
        fn well_formed_tokens_validate(name in inner_name()) {
            let raw = format!("{}{}{}", OPEN_DELIM, name, CLOSE_DELIM);
            let token = PlaceholderToken::parse(&raw).unwrap();
            prop_assert_eq!(token.inner_name(), name.as_str());
            prop_assert_eq!(token.as_str(), raw.as_str());
        }

        /// Property: strings without the delimiter pair are rejected.
        #[test]
        fn undelimited_strings_are_rejected(raw in "[a-zA-Z0-9_ ]{0,40}") {
            prop_assert!(PlaceholderToken::parse(&raw).is_err());
        }

        /// Property: resolution is total — every placement yields a string.
        #[test]
        fn resolution_is_total(
            names in prop::collection::vec(inner_name(), 0..8),
            patient in patient(),
        ) {
            let mut template = TemplateDocument::from_bytes(single_page_pdf()).unwrap();
            for name in &names {
                let token =
                    PlaceholderToken::parse(&format!("{{{{{name}}}}}")).unwrap();
                template.add_placement(token, 1, 10.0, 10.0).unwrap();
            }

            let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
            let resolved = resolve(&template, &patient, &HashMap::new(), today);
            prop_assert_eq!(resolved.len(), names.len());
        }

        /// Property: resolution is deterministic for a fixed calendar day.
        #[test]
        fn resolution_is_deterministic(
            name in inner_name(),
            value in "[a-zA-Z0-9 ]{0,20}",
            patient in patient(),
        ) {
            let mut template = TemplateDocument::from_bytes(single_page_pdf()).unwrap();
            let raw = format!("{{{{{name}}}}}");
            let token = PlaceholderToken::parse(&raw).unwrap();
            template.add_placement(token.clone(), 1, 10.0, 10.0).unwrap();
            template.add_placement(token, 1, 10.0, 40.0).unwrap();

            let custom = HashMap::from([(raw, value)]);
            let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
            let first = resolve(&template, &patient, &custom, today);
            let second = resolve(&template, &patient, &custom, today);
            prop_assert_eq!(first, second);
        }

        /// Property: stamping any resolvable template succeeds and leaves a
        /// loadable PDF, whatever the coordinates.
        #[test]
        fn stamping_is_lenient_about_coordinates(
            x in -500.0f64..1500.0,
            y in -500.0f64..1500.0,
            patient in patient(),
        ) {
            let mut template = TemplateDocument::from_bytes(single_page_pdf()).unwrap();
            let token = PlaceholderToken::parse("{{name}}").unwrap();
            template.add_placement(token, 1, x, y).unwrap();

            let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
            let resolved = resolve(&template, &patient, &HashMap::new(), today);
            let output = stamp(&template, &resolved).unwrap();
            prop_assert!(lopdf::Document::load_mem(&output).is_ok());
        }
    }
}
