//! Repository for the `pages` table.

use inkwell_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::page::{NewPage, PageImage};

/// Provides storage for chapter page images.
pub struct PageRepo;

impl PageRepo {
    /// Insert a page, replacing the image if the page number already exists.
    pub async fn upsert(conn: &mut PgConnection, page: &NewPage) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO pages (chapter_id, page_number, content_type, image) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_pages_chapter_page \
             DO UPDATE SET content_type = EXCLUDED.content_type, image = EXCLUDED.image \
             RETURNING id",
        )
        .bind(page.chapter_id)
        .bind(page.page_number)
        .bind(&page.content_type)
        .bind(&page.image)
        .fetch_one(conn)
        .await
    }

    /// Page numbers of a chapter in reading order.
    pub async fn list_numbers(pool: &PgPool, chapter_id: DbId) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT page_number FROM pages WHERE chapter_id = $1 ORDER BY page_number",
        )
        .bind(chapter_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_image(
        pool: &PgPool,
        chapter_id: DbId,
        page_number: i32,
    ) -> Result<Option<PageImage>, sqlx::Error> {
        sqlx::query_as::<_, PageImage>(
            "SELECT content_type, image FROM pages WHERE chapter_id = $1 AND page_number = $2",
        )
        .bind(chapter_id)
        .bind(page_number)
        .fetch_optional(pool)
        .await
    }

    /// Highest stored page number, or 0 for an empty chapter.
    pub async fn max_page_number(
        conn: &mut PgConnection,
        chapter_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(MAX(page_number), 0) FROM pages WHERE chapter_id = $1")
            .bind(chapter_id)
            .fetch_one(conn)
            .await
    }

    pub async fn delete_by_chapter(
        conn: &mut PgConnection,
        chapter_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE chapter_id = $1")
            .bind(chapter_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
