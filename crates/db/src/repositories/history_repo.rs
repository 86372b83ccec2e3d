//! Repository for the `reading_history` table.

use std::collections::HashSet;

use inkwell_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::history::HistoryEntry;

/// Column list for `reading_history` queries.
const COLUMNS: &str = "id, user_id, chapter_id, created_at, updated_at";

/// Provides the per-user record of chapters read or unlocked.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Every history row, most recently read first.
    pub async fn list(pool: &PgPool) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reading_history ORDER BY updated_at DESC, id DESC");
        sqlx::query_as::<_, HistoryEntry>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reading_history WHERE user_id = $1 \
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record a read. Re-reading a chapter refreshes `updated_at` instead of
    /// adding a row.
    pub async fn record(
        conn: &mut PgConnection,
        user_id: DbId,
        chapter_id: DbId,
    ) -> Result<HistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO reading_history (user_id, chapter_id) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_reading_history_user_chapter \
             DO UPDATE SET updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(user_id)
            .bind(chapter_id)
            .fetch_one(conn)
            .await
    }

    pub async fn chapter_ids_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<HashSet<DbId>, sqlx::Error> {
        let ids: Vec<DbId> =
            sqlx::query_scalar("SELECT chapter_id FROM reading_history WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(pool)
                .await?;
        Ok(ids.into_iter().collect())
    }

    /// Same as [`chapter_ids_for_user`](Self::chapter_ids_for_user), read on
    /// the caller's transaction.
    pub async fn chapter_ids_for_user_in(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<HashSet<DbId>, sqlx::Error> {
        let ids: Vec<DbId> =
            sqlx::query_scalar("SELECT chapter_id FROM reading_history WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(conn)
                .await?;
        Ok(ids.into_iter().collect())
    }
}
