//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::points::{PointsChange, PointsChangeRequest};
use inkwell_core::status::UserStatus;
use inkwell_core::types::DbId;
use inkwell_db::models::user::{CreateUser, UpdateUserStatus, User};
use inkwell_db::repositories::UserRepo;
use serde::Serialize;

use super::{require_user, validated};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PointsBalance {
    pub user_id: DbId,
    pub points: i64,
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    let input = validated(input)?;
    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = require_user(&state.pool, id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/{id}/points
///
/// Body carries exactly one of `points` (overwrite), `deduct` or `add`.
/// Deductions larger than the balance fail with 402.
pub async fn update_points(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PointsChangeRequest>,
) -> AppResult<Json<DataResponse<PointsBalance>>> {
    let change = PointsChange::try_from(input)?;

    let mut tx = state.pool.begin().await?;
    let points = UserRepo::adjust_points(&mut *tx, id, change).await?;
    tx.commit().await?;

    tracing::info!(user_id = id, ?change, points, "User points updated");
    Ok(Json(DataResponse {
        data: PointsBalance { user_id: id, points },
    }))
}

/// PUT /api/v1/users/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserStatus>,
) -> AppResult<Json<DataResponse<User>>> {
    let status: UserStatus = input.status.parse().map_err(CoreError::Validation)?;
    let user = UserRepo::set_status(&state.pool, id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user }))
}
