//! Page-addressed placement collection over immutable PDF bytes.

use crate::catalog::PlaceholderToken;
use crate::error::ReportError;
use report_types::PlacementRecord;

pub type PlacementId = u64;

/// One instance of a token located on a document page.
///
/// Coordinates are top-down offsets in PDF points from the page's top-left
/// corner, as recorded by the template editor. They are deliberately
/// unchecked: off-canvas values render off-page rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: PlacementId,
    pub token: PlaceholderToken,
    pub page: u32,
    pub x: f64,
    pub y: f64,
}

/// A paginated template plus the placements recorded on it.
///
/// The underlying PDF bytes are immutable; the page count is derived once
/// when they are set. Placements are an insertion-ordered sequence, which
/// keeps editor listings deterministic but has no rendering significance.
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    bytes: Vec<u8>,
    page_count: u32,
    placements: Vec<Placement>,
    next_id: PlacementId,
}

impl TemplateDocument {
    /// Build a template from uploaded PDF bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ReportError> {
        let page_count = crate::get_page_count(&bytes)?;
        Ok(Self {
            bytes,
            page_count,
            placements: Vec::new(),
            next_id: 1,
        })
    }

    /// Rebuild a template from stored bytes and saved placement records.
    ///
    /// Tokens are re-validated on load. Records referencing pages the
    /// current document does not have are kept as-is: the document may have
    /// been replaced since they were saved, and the stamper skips them.
    pub fn from_records(bytes: Vec<u8>, records: &[PlacementRecord]) -> Result<Self, ReportError> {
        let mut template = Self::from_bytes(bytes)?;
        for record in records {
            let token = PlaceholderToken::parse(&record.text)?;
            let id = template.next_id;
            template.next_id += 1;
            template.placements.push(Placement {
                id,
                token,
                page: record.page,
                x: record.x,
                y: record.y,
            });
        }
        Ok(template)
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Record a new placement and return its id.
    ///
    /// Fails with `PageOutOfRange` when `page` is outside
    /// `[1, page_count]`, leaving the placement list untouched.
    pub fn add_placement(
        &mut self,
        token: PlaceholderToken,
        page: u32,
        x: f64,
        y: f64,
    ) -> Result<PlacementId, ReportError> {
        if page == 0 || page > self.page_count {
            return Err(ReportError::PageOutOfRange {
                page,
                page_count: self.page_count,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.placements.push(Placement { id, token, page, x, y });
        Ok(id)
    }

    pub fn remove_placement(&mut self, id: PlacementId) -> Result<(), ReportError> {
        let index = self.index_of(id)?;
        self.placements.remove(index);
        Ok(())
    }

    /// Reposition an existing placement.
    pub fn move_placement(&mut self, id: PlacementId, x: f64, y: f64) -> Result<(), ReportError> {
        let index = self.index_of(id)?;
        let placement = &mut self.placements[index];
        placement.x = x;
        placement.y = y;
        Ok(())
    }

    /// Swap the underlying PDF for a re-uploaded one, keeping placements.
    ///
    /// The page count is re-derived from the new bytes. Placements may now
    /// reference pages the document does not have; they are skipped at
    /// stamp time rather than rejected here.
    pub fn replace_document(&mut self, bytes: Vec<u8>) -> Result<(), ReportError> {
        let page_count = crate::get_page_count(&bytes)?;
        self.bytes = bytes;
        self.page_count = page_count;
        Ok(())
    }

    /// Serialize placements in the stored wire format, insertion order
    /// preserved.
    pub fn to_records(&self) -> Vec<PlacementRecord> {
        self.placements
            .iter()
            .map(|p| PlacementRecord {
                text: p.token.as_str().to_string(),
                page: p.page,
                x: p.x,
                y: p.y,
            })
            .collect()
    }

    fn index_of(&self, id: PlacementId) -> Result<usize, ReportError> {
        self.placements
            .iter()
            .position(|p| p.id == id)
            .ok_or(ReportError::PlacementNotFound(id))
    }
}
