//! Handlers for user notifications.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use inkwell_db::models::notification::{CreateNotification, Notification};
use inkwell_db::repositories::NotificationRepo;

use super::{require_user, validated};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/notifications
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    let input = validated(input)?;
    let notification =
        NotificationRepo::create(&state.pool, input.user_id, &input.description).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: notification })))
}

/// GET /api/v1/notifications/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Notification>>> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;
    Ok(Json(DataResponse { data: notification }))
}

/// GET /api/v1/users/{id}/notifications
///
/// Newest first.
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    require_user(&state.pool, user_id).await?;
    let notifications = NotificationRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}
