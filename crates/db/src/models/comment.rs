//! Comment model and DTOs.

use inkwell_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub thread_id: DbId,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub content: String,
    pub likes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A top-level comment with the number of direct replies.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithReplies {
    pub id: DbId,
    pub thread_id: DbId,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub content: String,
    pub likes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub reply_count: i64,
}

/// DTO for posting a comment; the thread comes from the path.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateComment {
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}
