//! Handlers for the `/products` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use inkwell_db::models::product::{CreateProduct, Product, RestockProduct};
use inkwell_db::repositories::ProductRepo;

use super::validated;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    let input = validated(input)?;
    let product = ProductRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /api/v1/products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/products/{id}/restock
///
/// Queued waitlist entries are served by the next fulfilment run.
pub async fn restock(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RestockProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    let input = validated(input)?;
    let mut conn = state.pool.acquire().await?;
    let product = ProductRepo::restock(&mut conn, id, input.quantity)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    tracing::info!(
        product_id = id,
        added = input.quantity,
        in_stock = product.quantity_in_stock,
        "Product restocked"
    );
    Ok(Json(DataResponse { data: product }))
}
