//! Repository for the `users` table.

use inkwell_core::error::CoreError;
use inkwell_core::points::{self, PointsChange};
use inkwell_core::status::{SubscriberStatus, UserStatus};
use inkwell_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::DbError;
use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, name, email, phone, address, points, status, \
    subscriber_status, created_at, updated_at";

/// Provides CRUD and balance operations for users.
pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, phone, address, points) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(input.points.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Overwrite a user's balance. Returns `None` if the user does not exist.
    pub async fn set_points(
        conn: &mut PgConnection,
        id: DbId,
        points: i64,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET points = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(points)
            .fetch_optional(conn)
            .await
    }

    /// Lock the user row until the surrounding transaction ends and return
    /// the current balance. `None` if the user does not exist.
    pub async fn lock_points(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT points FROM users WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Apply a balance change under a row lock and return the new balance.
    ///
    /// Fails with `NotFound` for an unknown user and `InsufficientPoints`
    /// when a deduction exceeds the balance. Run inside a transaction so the
    /// lock is held until commit.
    pub async fn adjust_points(
        conn: &mut PgConnection,
        id: DbId,
        change: PointsChange,
    ) -> Result<i64, DbError> {
        let current = Self::lock_points(&mut *conn, id)
            .await?
            .ok_or(CoreError::NotFound { entity: "User", id })?;

        let updated = points::apply(current, change)?;
        sqlx::query("UPDATE users SET points = $2 WHERE id = $1")
            .bind(id)
            .bind(updated)
            .execute(&mut *conn)
            .await?;
        Ok(updated)
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: UserStatus,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Grant subscriber points and record the subscription tier.
    pub async fn activate_subscription(
        conn: &mut PgConnection,
        id: DbId,
        tier: SubscriberStatus,
        points: i64,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET points = $2, subscriber_status = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(points)
            .bind(tier.as_str())
            .fetch_optional(conn)
            .await
    }
}
