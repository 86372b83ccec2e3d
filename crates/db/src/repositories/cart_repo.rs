//! Repository for the `cart_items` table.

use inkwell_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::cart::{CartItem, CartLine};

/// Column list for `cart_items` queries.
const COLUMNS: &str = "id, user_id, product_id, quantity, created_at, updated_at";

/// Provides cart operations. Stock bookkeeping is the caller's job, done in
/// the same transaction via [`ProductRepo`](super::ProductRepo).
pub struct CartRepo;

impl CartRepo {
    /// A user's cart joined with product details.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<CartLine>, sqlx::Error> {
        sqlx::query_as::<_, CartLine>(
            "SELECT c.id, c.user_id, c.product_id, p.comic_name, p.volume_name, \
                    p.price_cents, c.quantity, \
                    (p.price_cents * c.quantity)::BIGINT AS line_total_cents \
             FROM cart_items c \
             JOIN products p ON p.id = c.product_id \
             WHERE c.user_id = $1 \
             ORDER BY c.created_at, c.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_for_user_product(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM cart_items WHERE user_id = $1 AND product_id = $2");
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(product_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cart_items WHERE id = $1");
        sqlx::query_as::<_, CartItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a cart row and lock it until the transaction ends.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cart_items WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, CartItem>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Add `quantity` of a product, creating the row or growing an existing one.
    pub async fn add_or_increment(
        conn: &mut PgConnection,
        user_id: DbId,
        product_id: DbId,
        quantity: i32,
    ) -> Result<CartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (user_id, product_id, quantity) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_cart_items_user_product \
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(conn)
            .await
    }

    /// Lower a row's quantity by `by`. A row reduced to zero is deleted and
    /// `None` is returned. The caller checks `by <= quantity` first.
    pub async fn reduce(
        conn: &mut PgConnection,
        id: DbId,
        by: i32,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "UPDATE cart_items SET quantity = quantity - $2 \
             WHERE id = $1 AND quantity > $2 \
             RETURNING {COLUMNS}"
        );
        let reduced = sqlx::query_as::<_, CartItem>(&query)
            .bind(id)
            .bind(by)
            .fetch_optional(&mut *conn)
            .await?;
        if reduced.is_none() {
            Self::delete(conn, id).await?;
        }
        Ok(reduced)
    }

    /// Delete a row, returning it so its quantity can be restocked.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!("DELETE FROM cart_items WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, CartItem>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn delete_for_user_product(
        conn: &mut PgConnection,
        user_id: DbId,
        product_id: DbId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(product_id)
            .fetch_optional(conn)
            .await
    }

    /// Empty a user's cart for checkout and return exactly the lines removed,
    /// priced at their current product price. Stock is not returned.
    pub async fn take_for_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        sqlx::query_as::<_, CartLine>(
            "WITH taken AS ( \
                 DELETE FROM cart_items WHERE user_id = $1 \
                 RETURNING id, user_id, product_id, quantity, created_at \
             ) \
             SELECT t.id, t.user_id, t.product_id, p.comic_name, p.volume_name, \
                    p.price_cents, t.quantity, \
                    (p.price_cents * t.quantity)::BIGINT AS line_total_cents \
             FROM taken t \
             JOIN products p ON p.id = t.product_id \
             ORDER BY t.created_at, t.id",
        )
        .bind(user_id)
        .fetch_all(conn)
        .await
    }

    /// Cart total in cents.
    pub async fn total_for_user(conn: &mut PgConnection, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(p.price_cents * c.quantity), 0)::BIGINT \
             FROM cart_items c \
             JOIN products p ON p.id = c.product_id \
             WHERE c.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(conn)
        .await
    }
}
