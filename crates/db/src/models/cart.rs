//! Cart model and DTOs.

use inkwell_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart row joined with its product, as listed to the user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartLine {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub comic_name: String,
    pub volume_name: String,
    pub price_cents: i64,
    pub quantity: i32,
    pub line_total_cents: i64,
}

/// DTO for `PATCH /cart/{id}/reduce`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReduceCartItem {
    #[validate(range(min = 1, message = "Quantity must be greater than zero"))]
    pub quantity: i32,
}
