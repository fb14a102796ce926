//! Burn resolved text onto template pages and emit final bytes.
//!
//! Each resolved placement is drawn into a content stream appended to its
//! page, so the text becomes part of the page itself rather than an
//! annotation a viewer could move or hide.

use crate::error::ReportError;
use crate::resolve::ResolvedPlacement;
use crate::template::TemplateDocument;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::{debug, warn};

const FONT_SIZE: f32 = 12.0;
const FONT_KEY: &str = "F1";

/// US Letter height, used when a page carries no resolvable MediaBox.
const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

/// Convert a top-down editor y offset to the PDF's bottom-up coordinate
/// system.
///
/// Template authoring measures from the top-left of the page; PDF text
/// operators measure from the bottom-left. Every draw goes through this one
/// function so callers never perform the flip ad hoc.
fn to_pdf_y(page_height: f64, y: f64) -> f64 {
    page_height - y
}

/// Stamp resolved text onto the template's pages and serialize the result.
///
/// Placements referencing pages beyond the document's current page count
/// (a template edited against a since-replaced document) are skipped with a
/// warning: partial stamping must not abort report completion. The input
/// template is never mutated, and identical inputs produce identical bytes.
///
/// Fails with `Stamping` only when the output cannot be serialized; the
/// caller must then leave the report pending so the attempt can be retried.
pub fn stamp(
    template: &TemplateDocument,
    resolved: &[ResolvedPlacement],
) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::load_mem(template.bytes())
        .map_err(|e| ReportError::UnreadableDocument(e.to_string()))?;

    let pages: Vec<(u32, ObjectId)> = doc.get_pages().into_iter().collect();
    let page_count = pages.len() as u32;

    for r in resolved {
        if r.placement.page == 0 || r.placement.page > page_count {
            warn!(
                page = r.placement.page,
                page_count,
                token = %r.placement.token,
                "skipping placement beyond document page count"
            );
        }
    }

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut stamped = 0usize;
    for (page_num, page_id) in &pages {
        let on_page: Vec<&ResolvedPlacement> = resolved
            .iter()
            .filter(|r| r.placement.page == *page_num)
            .collect();
        if on_page.is_empty() {
            continue;
        }

        let height = page_height(&doc, *page_id);

        let mut operations = vec![Operation::new(
            "rg",
            vec![Object::Real(0.0), Object::Real(0.0), Object::Real(0.0)],
        )];
        for r in &on_page {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(FONT_KEY.into()), Object::Real(FONT_SIZE)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![
                    Object::Real(r.placement.x as f32),
                    Object::Real(to_pdf_y(height, r.placement.y) as f32),
                ],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(
                    r.text.as_bytes().to_vec(),
                    StringFormat::Literal,
                )],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let encoded = Content { operations }
            .encode()
            .map_err(|e| ReportError::Stamping(e.to_string()))?;
        let stream_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        append_page_content(&mut doc, *page_id, stream_id)?;
        register_font(&mut doc, *page_id, font_id)?;
        stamped += on_page.len();
    }

    debug!(stamped, total = resolved.len(), "stamped placements");

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| ReportError::Stamping(e.to_string()))?;
    Ok(output)
}

/// Height of a page from its MediaBox, following the Pages tree when the
/// box is inherited.
fn page_height(doc: &Document, page_id: ObjectId) -> f64 {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let Ok(dict) = doc.get_dictionary(id) else { break };

        if let Some(mb) = resolve_array(doc, dict.get(b"MediaBox").ok()) {
            if mb.len() == 4 {
                if let (Some(y0), Some(y1)) = (as_number(&mb[1]), as_number(&mb[3])) {
                    return y1 - y0;
                }
            }
        }

        current = match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => Some(*parent),
            _ => None,
        };
    }
    DEFAULT_PAGE_HEIGHT
}

fn resolve_array<'a>(doc: &'a Document, obj: Option<&'a Object>) -> Option<&'a Vec<Object>> {
    match obj {
        Some(Object::Array(arr)) => Some(arr),
        Some(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(arr)) => Some(arr),
            _ => None,
        },
        _ => None,
    }
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Append a content stream reference to a page, promoting a single Contents
/// reference to an array when needed.
fn append_page_content(
    doc: &mut Document,
    page_id: ObjectId,
    stream_id: ObjectId,
) -> Result<(), ReportError> {
    let page = doc
        .get_object_mut(page_id)
        .map_err(|e| ReportError::Stamping(e.to_string()))?;
    let dict = page
        .as_dict_mut()
        .map_err(|e| ReportError::Stamping(e.to_string()))?;

    let contents = match dict.get(b"Contents") {
        Ok(Object::Array(existing)) => {
            let mut arr = existing.clone();
            arr.push(Object::Reference(stream_id));
            Object::Array(arr)
        }
        Ok(existing @ Object::Reference(_)) => {
            Object::Array(vec![existing.clone(), Object::Reference(stream_id)])
        }
        _ => Object::Reference(stream_id),
    };
    dict.set("Contents", contents);
    Ok(())
}

/// Make the stamping font reachable from a page's resources as /F1.
///
/// Resources and their Font entry may be inline dictionaries, indirect
/// references, or missing entirely; all shapes are handled without
/// disturbing fonts the page already declares.
fn register_font(
    doc: &mut Document,
    page_id: ObjectId,
    font_id: ObjectId,
) -> Result<(), ReportError> {
    let resources_ref = {
        let dict = doc
            .get_dictionary(page_id)
            .map_err(|e| ReportError::Stamping(e.to_string()))?;
        match dict.get(b"Resources") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        }
    };

    if let Some(res_id) = resources_ref {
        let fonts_ref = {
            let res = doc
                .get_dictionary(res_id)
                .map_err(|e| ReportError::Stamping(e.to_string()))?;
            match res.get(b"Font") {
                Ok(Object::Reference(id)) => Some(*id),
                _ => None,
            }
        };
        if let Some(fonts_id) = fonts_ref {
            let fonts = doc
                .get_object_mut(fonts_id)
                .map_err(|e| ReportError::Stamping(e.to_string()))?
                .as_dict_mut()
                .map_err(|e| ReportError::Stamping(e.to_string()))?;
            fonts.set(FONT_KEY, Object::Reference(font_id));
        } else {
            let res = doc
                .get_object_mut(res_id)
                .map_err(|e| ReportError::Stamping(e.to_string()))?
                .as_dict_mut()
                .map_err(|e| ReportError::Stamping(e.to_string()))?;
            insert_font(res, font_id);
        }
        return Ok(());
    }

    let page = doc
        .get_object_mut(page_id)
        .map_err(|e| ReportError::Stamping(e.to_string()))?;
    let dict = page
        .as_dict_mut()
        .map_err(|e| ReportError::Stamping(e.to_string()))?;
    match dict.get_mut(b"Resources") {
        Ok(Object::Dictionary(res)) => insert_font(res, font_id),
        _ => {
            let mut res = Dictionary::new();
            insert_font(&mut res, font_id);
            dict.set("Resources", Object::Dictionary(res));
        }
    }
    Ok(())
}

fn insert_font(resources: &mut Dictionary, font_id: ObjectId) {
    match resources.get_mut(b"Font") {
        Ok(Object::Dictionary(fonts)) => fonts.set(FONT_KEY, Object::Reference(font_id)),
        _ => {
            let mut fonts = Dictionary::new();
            fonts.set(FONT_KEY, Object::Reference(font_id));
            resources.set("Font", Object::Dictionary(fonts));
        }
    }
}
