//! Repository for the `receipts` table.

use inkwell_core::money;
use inkwell_core::status::SubscriberStatus;
use inkwell_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::receipt::{CreateReceipt, Receipt};

/// Column list for `receipts` queries.
const COLUMNS: &str = "id, user_id, transaction_id, payment_method, current_points, \
    subscriber_status, billing_address, gst_cents, total_cents, created_at, updated_at";

/// Provides storage for payment receipts.
pub struct ReceiptRepo;

impl ReceiptRepo {
    /// Insert a receipt, deriving the GST portion from the total.
    ///
    /// A repeated `transaction_id` violates `uq_receipts_transaction_id`.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateReceipt,
    ) -> Result<Receipt, sqlx::Error> {
        let breakdown = money::receipt_breakdown(input.total_cents);
        let query = format!(
            "INSERT INTO receipts \
                (user_id, transaction_id, payment_method, current_points, \
                 subscriber_status, billing_address, gst_cents, total_cents) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Receipt>(&query)
            .bind(input.user_id)
            .bind(&input.transaction_id)
            .bind(input.payment_method.as_deref().unwrap_or("CREDIT_CARD"))
            .bind(input.current_points)
            .bind(
                input
                    .subscriber_status
                    .as_deref()
                    .unwrap_or(SubscriberStatus::None.as_str()),
            )
            .bind(&input.billing_address)
            .bind(breakdown.gst_cents)
            .bind(breakdown.total_cents)
            .fetch_one(conn)
            .await
    }

    /// A user's receipts, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Receipt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM receipts WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Receipt>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Receipt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM receipts WHERE id = $1");
        sqlx::query_as::<_, Receipt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_transaction(
        pool: &PgPool,
        transaction_id: &str,
    ) -> Result<Option<Receipt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM receipts WHERE transaction_id = $1");
        sqlx::query_as::<_, Receipt>(&query)
            .bind(transaction_id)
            .fetch_optional(pool)
            .await
    }
}
