//! Handlers for reading history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::types::DbId;
use inkwell_db::models::history::{HistoryEntry, RecordHistory};
use inkwell_db::repositories::HistoryRepo;

use super::chapter::require_chapter;
use super::require_user;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/history
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<HistoryEntry>>>> {
    let entries = HistoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/history
///
/// Re-reading a chapter refreshes the existing entry.
pub async fn record(
    State(state): State<AppState>,
    Json(input): Json<RecordHistory>,
) -> AppResult<(StatusCode, Json<DataResponse<HistoryEntry>>)> {
    require_user(&state.pool, input.user_id).await?;
    require_chapter(&state.pool, input.chapter_id).await?;

    let mut conn = state.pool.acquire().await?;
    let entry = HistoryRepo::record(&mut conn, input.user_id, input.chapter_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/users/{id}/history
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<HistoryEntry>>>> {
    require_user(&state.pool, user_id).await?;
    let entries = HistoryRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}
