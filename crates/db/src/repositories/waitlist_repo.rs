//! Repository for the `waitlist_entries` table.

use inkwell_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::waitlist::WaitlistEntry;

/// Column list for `waitlist_entries` queries.
const COLUMNS: &str = "id, user_id, product_id, queued_at, created_at, updated_at";

/// Provides the FCFS waitlist queue.
pub struct WaitlistRepo;

impl WaitlistRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
    ) -> Result<WaitlistEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO waitlist_entries (user_id, product_id) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(user_id)
            .bind(product_id)
            .fetch_one(pool)
            .await
    }

    /// Every queued entry in service order.
    pub async fn list(pool: &PgPool) -> Result<Vec<WaitlistEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM waitlist_entries ORDER BY queued_at, id");
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WaitlistEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM waitlist_entries WHERE id = $1");
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM waitlist_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove an entry as part of a fulfilment transaction. Returns `false`
    /// if another run already consumed it.
    pub async fn take(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM waitlist_entries WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
