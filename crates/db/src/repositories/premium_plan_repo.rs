//! Repository for the `premium_plans` table.

use inkwell_core::types::DbId;
use sqlx::PgPool;

use crate::models::premium_plan::PremiumPlan;

/// Column list for `premium_plans` queries.
const COLUMNS: &str =
    "id, name, duration, price_cents, description, features, created_at, updated_at";

/// Read access to the seeded premium plans.
pub struct PremiumPlanRepo;

impl PremiumPlanRepo {
    /// All plans, cheapest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PremiumPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM premium_plans ORDER BY price_cents");
        sqlx::query_as::<_, PremiumPlan>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PremiumPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM premium_plans WHERE id = $1");
        sqlx::query_as::<_, PremiumPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
