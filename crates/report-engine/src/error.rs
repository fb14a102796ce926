use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid placeholder token: {0:?} (expected {{{{name}}}} format)")]
    InvalidToken(String),

    #[error("Page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: u32, page_count: u32 },

    #[error("Failed to parse PDF: {0}")]
    UnreadableDocument(String),

    #[error("No placement with id {0}")]
    PlacementNotFound(u64),

    #[error("Failed to produce stamped PDF: {0}")]
    Stamping(String),
}
