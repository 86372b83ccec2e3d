//! Repository for the `comics` table.

use inkwell_core::genre;
use inkwell_core::status::ComicStatus;
use inkwell_core::types::DbId;
use sqlx::PgPool;

use crate::models::comic::{Comic, CreateComic, UpdateComic};

/// Column list for `comics` queries.
const COLUMNS: &str =
    "id, comic_name, author, genre, status, description, comic_art, created_at, updated_at";

/// Provides CRUD operations for comics.
pub struct ComicRepo;

impl ComicRepo {
    /// Insert a comic. `status` must already be validated; it defaults to
    /// `ongoing` when absent.
    pub async fn create(pool: &PgPool, input: &CreateComic) -> Result<Comic, sqlx::Error> {
        let query = format!(
            "INSERT INTO comics (comic_name, author, genre, status, description, comic_art) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(&input.comic_name)
            .bind(&input.author)
            .bind(genre::join(&input.genre))
            .bind(
                input
                    .status
                    .as_deref()
                    .unwrap_or(ComicStatus::Ongoing.as_str()),
            )
            .bind(&input.description)
            .bind(&input.comic_art)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comics WHERE id = $1");
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact-name lookup, used by the page importer.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comics WHERE comic_name = $1");
        sqlx::query_as::<_, Comic>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Comic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comics ORDER BY comic_name");
        sqlx::query_as::<_, Comic>(&query).fetch_all(pool).await
    }

    /// Partial update; `None` fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComic,
    ) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!(
            "UPDATE comics SET \
                comic_name = COALESCE($2, comic_name), \
                author = COALESCE($3, author), \
                genre = COALESCE($4, genre), \
                status = COALESCE($5, status), \
                description = COALESCE($6, description), \
                comic_art = COALESCE($7, comic_art) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .bind(&input.comic_name)
            .bind(&input.author)
            .bind(input.genre.as_deref().map(genre::join))
            .bind(&input.status)
            .bind(&input.description)
            .bind(&input.comic_art)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comic and, by cascade, its chapters and pages.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
