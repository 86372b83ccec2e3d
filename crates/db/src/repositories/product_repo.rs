//! Repository for the `products` table.

use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::DbError;
use crate::models::product::{CreateProduct, Product};

/// Column list for `products` queries.
const COLUMNS: &str =
    "id, comic_name, volume_name, price_cents, quantity_in_stock, created_at, updated_at";

/// Provides catalogue and stock operations for store products.
pub struct ProductRepo;

impl ProductRepo {
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (comic_name, volume_name, price_cents, quantity_in_stock) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.comic_name)
            .bind(&input.volume_name)
            .bind(input.price_cents)
            .bind(input.quantity_in_stock)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY comic_name, volume_name");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    pub async fn list_in_stock(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE quantity_in_stock > 0 ORDER BY id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Take `quantity` units out of stock.
    ///
    /// Fails with `NotFound` for an unknown product and `Conflict` when there
    /// are not enough units; stock is left untouched in both cases.
    pub async fn reserve(
        conn: &mut PgConnection,
        id: DbId,
        quantity: i32,
    ) -> Result<Product, DbError> {
        let query = format!(
            "UPDATE products SET quantity_in_stock = quantity_in_stock - $2 \
             WHERE id = $1 AND quantity_in_stock >= $2 \
             RETURNING {COLUMNS}"
        );
        let reserved = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(quantity)
            .fetch_optional(&mut *conn)
            .await?;
        if let Some(product) = reserved {
            return Ok(product);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        if exists {
            Err(CoreError::Conflict(format!("Product {id} is out of stock")).into())
        } else {
            Err(CoreError::NotFound {
                entity: "Product",
                id,
            }
            .into())
        }
    }

    /// Return `quantity` units to stock.
    pub async fn restock(
        conn: &mut PgConnection,
        id: DbId,
        quantity: i32,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET quantity_in_stock = quantity_in_stock + $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(quantity)
            .fetch_optional(conn)
            .await
    }
}
