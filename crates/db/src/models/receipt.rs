//! Receipt model and DTOs.

use inkwell_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `receipts` table. Amounts are GST-inclusive cents.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Receipt {
    pub id: DbId,
    pub user_id: DbId,
    pub transaction_id: String,
    pub payment_method: String,
    pub current_points: i64,
    pub subscriber_status: String,
    pub billing_address: Option<String>,
    pub gst_cents: i64,
    pub total_cents: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a payment. The GST portion is derived from
/// `total_cents` on insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReceipt {
    pub user_id: DbId,
    #[validate(length(min = 1, message = "transaction_id must not be empty"))]
    pub transaction_id: String,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub current_points: i64,
    pub subscriber_status: Option<String>,
    pub billing_address: Option<String>,
    #[validate(range(min = 0, message = "total_cents must not be negative"))]
    pub total_cents: i64,
}
