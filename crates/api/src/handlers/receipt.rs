//! Handlers for payment receipts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::status::SubscriberStatus;
use inkwell_core::types::DbId;
use inkwell_db::models::receipt::{CreateReceipt, Receipt};
use inkwell_db::repositories::ReceiptRepo;

use super::{require_user, validated};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/receipts
///
/// `total_cents` is GST-inclusive; the GST portion is derived on insert.
/// A transaction id can only be receipted once (409).
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateReceipt>,
) -> AppResult<(StatusCode, Json<DataResponse<Receipt>>)> {
    let input = validated(input)?;
    if let Some(status) = input.subscriber_status.as_deref() {
        status
            .parse::<SubscriberStatus>()
            .map_err(CoreError::Validation)?;
    }

    let mut conn = state.pool.acquire().await?;
    let receipt = ReceiptRepo::create(&mut conn, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

/// GET /api/v1/receipts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Receipt>>> {
    let receipt = ReceiptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Receipt",
            id,
        }))?;
    Ok(Json(DataResponse { data: receipt }))
}

/// GET /api/v1/receipts/transaction/{transaction_id}
pub async fn get_by_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> AppResult<Json<DataResponse<Receipt>>> {
    let receipt = ReceiptRepo::find_by_transaction(&state.pool, &transaction_id)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    Ok(Json(DataResponse { data: receipt }))
}

/// GET /api/v1/users/{id}/receipts
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Receipt>>>> {
    require_user(&state.pool, user_id).await?;
    let receipts = ReceiptRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: receipts }))
}
