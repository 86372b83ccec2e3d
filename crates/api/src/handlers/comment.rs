//! Handlers for the `/comments` resource.

use axum::extract::{Path, State};
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use inkwell_db::models::comment::Comment;
use inkwell_db::repositories::CommentRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/comments/{id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    let replies = CommentRepo::list_replies(&state.pool, id).await?;
    Ok(Json(DataResponse { data: replies }))
}

/// POST /api/v1/comments/{id}/like
pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let comment = CommentRepo::like(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    Ok(Json(DataResponse { data: comment }))
}
