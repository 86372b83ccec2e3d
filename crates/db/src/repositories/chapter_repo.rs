//! Repository for the `chapters` table.

use inkwell_core::types::DbId;
use sqlx::PgPool;

use crate::models::chapter::{Chapter, CreateChapter};

/// Column list for `chapters` queries.
const COLUMNS: &str =
    "id, comic_id, chapter_number, title, release_date, image_path, created_at, updated_at";

/// Provides CRUD operations for chapters.
pub struct ChapterRepo;

impl ChapterRepo {
    /// Insert a chapter. A duplicate `(comic_id, chapter_number)` surfaces as
    /// a `uq_chapters_comic_number` violation.
    pub async fn create(
        pool: &PgPool,
        comic_id: DbId,
        input: &CreateChapter,
    ) -> Result<Chapter, sqlx::Error> {
        let query = format!(
            "INSERT INTO chapters (comic_id, chapter_number, title, release_date, image_path) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(comic_id)
            .bind(input.chapter_number)
            .bind(&input.title)
            .bind(input.release_date)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chapter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chapters WHERE id = $1");
        sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_number(
        pool: &PgPool,
        comic_id: DbId,
        chapter_number: i32,
    ) -> Result<Option<Chapter>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM chapters WHERE comic_id = $1 AND chapter_number = $2");
        sqlx::query_as::<_, Chapter>(&query)
            .bind(comic_id)
            .bind(chapter_number)
            .fetch_optional(pool)
            .await
    }

    /// All chapters of a comic, ascending by number.
    pub async fn list_by_comic(pool: &PgPool, comic_id: DbId) -> Result<Vec<Chapter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chapters WHERE comic_id = $1 ORDER BY chapter_number"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(comic_id)
            .fetch_all(pool)
            .await
    }

    pub async fn page_count(pool: &PgPool, chapter_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM pages WHERE chapter_id = $1")
            .bind(chapter_id)
            .fetch_one(pool)
            .await
    }

    pub async fn set_image_path(
        pool: &PgPool,
        id: DbId,
        image_path: &str,
    ) -> Result<Option<Chapter>, sqlx::Error> {
        let query =
            format!("UPDATE chapters SET image_path = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .bind(image_path)
            .fetch_optional(pool)
            .await
    }
}
