//! Page image rows.

use inkwell_core::types::DbId;
use sqlx::FromRow;

/// Stored bytes for one page, as served by the image endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct PageImage {
    pub content_type: String,
    pub image: Vec<u8>,
}

/// A page to write: number, MIME type and raw bytes.
#[derive(Debug, Clone)]
pub struct NewPage {
    pub chapter_id: DbId,
    pub page_number: i32,
    pub content_type: String,
    pub image: Vec<u8>,
}
