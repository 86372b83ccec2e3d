//! Chapter entity model and DTOs.

use chrono::NaiveDate;
use inkwell_core::access::ChapterRef;
use inkwell_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `chapters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chapter {
    pub id: DbId,
    pub comic_id: DbId,
    pub chapter_number: i32,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Chapter {
    /// The subset of fields the access rules work on.
    pub fn to_ref(&self) -> ChapterRef {
        ChapterRef {
            id: self.id,
            comic_id: self.comic_id,
            chapter_number: self.chapter_number,
            title: self.title.clone(),
        }
    }
}

/// DTO for creating a chapter under a comic (the comic comes from the path).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChapter {
    #[validate(range(min = 1, message = "chapter_number must be at least 1"))]
    pub chapter_number: i32,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub image_path: Option<String>,
}
