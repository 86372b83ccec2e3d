//! Shopping cart handlers.
//!
//! Adding to the cart reserves stock; removing or reducing an entry gives
//! the units back. Each change runs in one transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use inkwell_db::models::cart::{CartItem, CartLine, ReduceCartItem};
use inkwell_db::repositories::{CartRepo, ProductRepo};
use serde::Serialize;

use super::{require_user, validated};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CartView {
    pub user_id: DbId,
    pub items: Vec<CartLine>,
    pub total_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct CartReduction {
    pub cart_item_id: DbId,
    pub product_id: DbId,
    pub quantity_removed: i32,
    /// Zero once the entry has been removed.
    pub quantity_remaining: i32,
}

/// GET /api/v1/users/{id}/cart
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CartView>>> {
    require_user(&state.pool, user_id).await?;
    let items = CartRepo::list_for_user(&state.pool, user_id).await?;
    let total_cents = items.iter().map(|l| l.line_total_cents).sum();
    Ok(Json(DataResponse {
        data: CartView {
            user_id,
            items,
            total_cents,
        },
    }))
}

/// POST /api/v1/users/{id}/cart/{product_id}
///
/// Adds one unit. 409 when the product is out of stock.
pub async fn add(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(DbId, DbId)>,
) -> AppResult<(StatusCode, Json<DataResponse<CartItem>>)> {
    require_user(&state.pool, user_id).await?;

    let mut tx = state.pool.begin().await?;
    let product = ProductRepo::reserve(&mut *tx, product_id, 1).await?;
    let item = CartRepo::add_or_increment(&mut *tx, user_id, product_id, 1).await?;
    tx.commit().await?;

    tracing::info!(
        user_id,
        product_id,
        quantity = item.quantity,
        in_stock = product.quantity_in_stock,
        "Added to cart"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// DELETE /api/v1/users/{id}/cart/{product_id}
///
/// Removes the whole entry and returns its quantity to stock.
pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<CartItem>>> {
    let mut tx = state.pool.begin().await?;
    let item = CartRepo::delete_for_user_product(&mut *tx, user_id, product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id: product_id,
        }))?;
    ProductRepo::restock(&mut *tx, product_id, item.quantity).await?;
    tx.commit().await?;

    tracing::info!(user_id, product_id, quantity = item.quantity, "Removed from cart");
    Ok(Json(DataResponse { data: item }))
}

/// PATCH /api/v1/cart/{id}/reduce
///
/// Lowers an entry's quantity and restocks the difference. Reducing to
/// zero removes the entry; reducing below zero is rejected.
pub async fn reduce(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReduceCartItem>,
) -> AppResult<Json<DataResponse<CartReduction>>> {
    let input = validated(input)?;

    let mut tx = state.pool.begin().await?;
    let item = CartRepo::lock_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id,
        }))?;
    if input.quantity > item.quantity {
        return Err(CoreError::Validation(format!(
            "Cannot remove {} units: only {} in cart",
            input.quantity, item.quantity
        ))
        .into());
    }

    let remaining = CartRepo::reduce(&mut *tx, id, input.quantity).await?;
    ProductRepo::restock(&mut *tx, item.product_id, input.quantity).await?;
    tx.commit().await?;

    Ok(Json(DataResponse {
        data: CartReduction {
            cart_item_id: id,
            product_id: item.product_id,
            quantity_removed: input.quantity,
            quantity_remaining: remaining.map_or(0, |i| i.quantity),
        },
    }))
}
