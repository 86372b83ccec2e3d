//! User entity model and DTOs.

use inkwell_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub points: i64,
    pub status: String,
    pub subscriber_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = 0, message = "points must not be negative"))]
    pub points: Option<i64>,
}

/// DTO for `PUT /users/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserStatus {
    pub status: String,
}
