//! Discussion thread handlers, including posting comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::status::ThreadStatus;
use inkwell_core::types::DbId;
use inkwell_db::models::comment::{Comment, CommentWithReplies, CreateComment};
use inkwell_db::models::thread::{CreateThread, Thread, UpdateThreadStatus};
use inkwell_db::repositories::{CommentRepo, ThreadRepo};
use serde::Serialize;

use super::validated;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommentCount {
    pub thread_id: DbId,
    pub comment_count: i32,
}

fn thread_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Thread",
        id,
    })
}

/// GET /api/v1/threads
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Thread>>>> {
    let threads = ThreadRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: threads }))
}

/// POST /api/v1/threads
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateThread>,
) -> AppResult<(StatusCode, Json<DataResponse<Thread>>)> {
    let input = validated(input)?;
    let thread = ThreadRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: thread })))
}

/// PUT /api/v1/threads/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateThreadStatus>,
) -> AppResult<Json<DataResponse<Thread>>> {
    let status: ThreadStatus = input.status.parse().map_err(CoreError::Validation)?;
    let thread = ThreadRepo::set_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| thread_not_found(id))?;
    Ok(Json(DataResponse { data: thread }))
}

/// POST /api/v1/threads/{id}/like
pub async fn like(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Thread>>> {
    let thread = ThreadRepo::like(&state.pool, id)
        .await?
        .ok_or_else(|| thread_not_found(id))?;
    Ok(Json(DataResponse { data: thread }))
}

/// GET /api/v1/threads/{id}/comments/count
pub async fn comment_count(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CommentCount>>> {
    let comment_count = ThreadRepo::comment_count(&state.pool, id)
        .await?
        .ok_or_else(|| thread_not_found(id))?;
    Ok(Json(DataResponse {
        data: CommentCount {
            thread_id: id,
            comment_count,
        },
    }))
}

/// GET /api/v1/threads/{id}/comments
///
/// Top-level comments, oldest first, each with its direct reply count.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithReplies>>>> {
    ThreadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| thread_not_found(id))?;
    let comments = CommentRepo::list_top_level(&state.pool, id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/threads/{id}/comments
///
/// Inserts the comment and refreshes the thread's comment counter in one
/// transaction. A reply's parent must belong to the same thread.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let input = validated(input)?;
    ThreadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| thread_not_found(id))?;

    if let Some(parent_id) = input.parent_id {
        let parent = CommentRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id: parent_id,
            }))?;
        if parent.thread_id != id {
            return Err(CoreError::Validation(format!(
                "Comment {parent_id} belongs to a different thread"
            ))
            .into());
        }
    }

    let mut tx = state.pool.begin().await?;
    let comment = CommentRepo::create(&mut *tx, id, &input).await?;
    let comment_count = ThreadRepo::recount_comments(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::debug!(thread_id = id, comment_id = comment.id, comment_count, "Comment posted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
