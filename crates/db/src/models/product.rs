//! Store product model and DTOs.

use inkwell_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub comic_name: String,
    pub volume_name: String,
    pub price_cents: i64,
    pub quantity_in_stock: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "comic_name must not be empty"))]
    pub comic_name: String,
    #[validate(length(min = 1, message = "volume_name must not be empty"))]
    pub volume_name: String,
    #[validate(range(min = 0, message = "price_cents must not be negative"))]
    pub price_cents: i64,
    #[validate(range(min = 0, message = "quantity_in_stock must not be negative"))]
    #[serde(default)]
    pub quantity_in_stock: i32,
}

/// DTO for `POST /products/{id}/restock`.
#[derive(Debug, Deserialize, Validate)]
pub struct RestockProduct {
    #[validate(range(min = 1, message = "quantity must be greater than zero"))]
    pub quantity: i32,
}
