//! Premium plan model. Plans are seeded by migration and read-only.

use inkwell_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::serialize_comma_list;

/// A row from the `premium_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PremiumPlan {
    pub id: DbId,
    pub name: String,
    pub duration: String,
    pub price_cents: i64,
    pub description: String,
    #[serde(serialize_with = "serialize_comma_list")]
    pub features: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
