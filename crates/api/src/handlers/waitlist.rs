//! Waitlist handlers and the fulfilment trigger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use inkwell_db::models::waitlist::WaitlistEntry;
use inkwell_db::repositories::{ProductRepo, WaitlistRepo};
use serde::Serialize;

use super::require_user;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FulfilmentStatus {
    pub running: bool,
}

/// GET /api/v1/waitlist
///
/// Entries in service order (first come, first served).
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WaitlistEntry>>>> {
    let entries = WaitlistRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/users/{id}/waitlist/{product_id}
pub async fn join(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(DbId, DbId)>,
) -> AppResult<(StatusCode, Json<DataResponse<WaitlistEntry>>)> {
    require_user(&state.pool, user_id).await?;
    ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    let entry = WaitlistRepo::create(&state.pool, user_id, product_id).await?;
    tracing::info!(entry_id = entry.id, user_id, product_id, "Joined waitlist");
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// DELETE /api/v1/waitlist/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if WaitlistRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "WaitlistEntry",
            id,
        }))
    }
}

/// POST /api/v1/waitlist/fulfil
///
/// Starts a fulfilment run in the background. 409 if one is in progress.
pub async fn trigger_fulfilment(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<DataResponse<FulfilmentStatus>>)> {
    if !state.fulfiller.spawn_run() {
        return Err(CoreError::Conflict(
            "A waitlist fulfilment run is already in progress".into(),
        )
        .into());
    }
    tracing::info!("Waitlist fulfilment run started");
    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: FulfilmentStatus { running: true },
        }),
    ))
}

/// GET /api/v1/waitlist/fulfil
pub async fn fulfilment_status(State(state): State<AppState>) -> Json<DataResponse<FulfilmentStatus>> {
    Json(DataResponse {
        data: FulfilmentStatus {
            running: state.fulfiller.is_running(),
        },
    })
}
