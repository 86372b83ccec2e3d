//! Repository for the `comments` table.

use inkwell_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::comment::{Comment, CommentWithReplies, CreateComment};

/// Column list for `comments` queries.
const COLUMNS: &str = "id, thread_id, user_id, parent_id, content, likes, created_at, updated_at";

/// Provides CRUD operations for comments and replies.
pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(
        conn: &mut PgConnection,
        thread_id: DbId,
        input: &CreateComment,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (thread_id, user_id, parent_id, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(thread_id)
            .bind(input.user_id)
            .bind(input.parent_id)
            .bind(&input.content)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Top-level comments of a thread, oldest first, with direct reply counts.
    pub async fn list_top_level(
        pool: &PgPool,
        thread_id: DbId,
    ) -> Result<Vec<CommentWithReplies>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithReplies>(
            "SELECT c.id, c.thread_id, c.user_id, c.parent_id, c.content, c.likes, \
                    c.created_at, c.updated_at, \
                    (SELECT COUNT(*) FROM comments r WHERE r.parent_id = c.id) AS reply_count \
             FROM comments c \
             WHERE c.thread_id = $1 AND c.parent_id IS NULL \
             ORDER BY c.created_at, c.id",
        )
        .bind(thread_id)
        .fetch_all(pool)
        .await
    }

    /// Direct replies to a comment, oldest first.
    pub async fn list_replies(pool: &PgPool, parent_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments WHERE parent_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    pub async fn like(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query =
            format!("UPDATE comments SET likes = likes + 1 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
