//! Discussion thread model and DTOs.

use inkwell_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `threads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Thread {
    pub id: DbId,
    pub chapter_id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub status: String,
    pub likes: i32,
    pub comment_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateThread {
    pub chapter_id: DbId,
    pub user_id: DbId,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateThreadStatus {
    pub status: String,
}
