//! Repository for the `threads` table.

use inkwell_core::status::ThreadStatus;
use inkwell_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::thread::{CreateThread, Thread};

/// Column list for `threads` queries.
const COLUMNS: &str = "id, chapter_id, user_id, title, content, status, likes, comment_count, \
    created_at, updated_at";

/// Provides CRUD operations for discussion threads.
pub struct ThreadRepo;

impl ThreadRepo {
    pub async fn create(pool: &PgPool, input: &CreateThread) -> Result<Thread, sqlx::Error> {
        let query = format!(
            "INSERT INTO threads (chapter_id, user_id, title, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Thread>(&query)
            .bind(input.chapter_id)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// All threads, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Thread>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threads ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Thread>(&query).fetch_all(pool).await
    }

    pub async fn list_by_chapter(pool: &PgPool, chapter_id: DbId) -> Result<Vec<Thread>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM threads WHERE chapter_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Thread>(&query)
            .bind(chapter_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Thread>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM threads WHERE id = $1");
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ThreadStatus,
    ) -> Result<Option<Thread>, sqlx::Error> {
        let query = format!("UPDATE threads SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn like(pool: &PgPool, id: DbId) -> Result<Option<Thread>, sqlx::Error> {
        let query =
            format!("UPDATE threads SET likes = likes + 1 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Thread>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The stored comment counter. `None` if the thread does not exist.
    pub async fn comment_count(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT comment_count FROM threads WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Recompute the counter from the thread's top-level comments.
    pub async fn recount_comments(conn: &mut PgConnection, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE threads SET comment_count = ( \
                 SELECT COUNT(*) FROM comments WHERE thread_id = $1 AND parent_id IS NULL \
             ) \
             WHERE id = $1 \
             RETURNING comment_count",
        )
        .bind(id)
        .fetch_one(conn)
        .await
    }
}
