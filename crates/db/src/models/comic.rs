//! Comic entity model and DTOs.

use inkwell_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::serialize_comma_list;

/// A row from the `comics` table. `genre` is stored comma-separated and
/// serialized as a list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comic {
    pub id: DbId,
    pub comic_name: String,
    pub author: String,
    #[serde(serialize_with = "serialize_comma_list")]
    pub genre: String,
    pub status: String,
    pub description: Option<String>,
    pub comic_art: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a comic.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateComic {
    #[validate(length(min = 1, message = "comic_name must not be empty"))]
    pub comic_name: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    #[serde(default)]
    pub genre: Vec<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub comic_art: Option<String>,
}

/// DTO for partially updating a comic. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateComic {
    #[validate(length(min = 1, message = "comic_name must not be empty"))]
    pub comic_name: Option<String>,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: Option<String>,
    pub genre: Option<Vec<String>>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub comic_art: Option<String>,
}
