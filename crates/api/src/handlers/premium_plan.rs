//! Read-only premium plan catalogue.

use axum::extract::{Path, State};
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::types::DbId;
use inkwell_db::models::premium_plan::PremiumPlan;
use inkwell_db::repositories::PremiumPlanRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/premium-plans
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PremiumPlan>>>> {
    let plans = PremiumPlanRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: plans }))
}

pub(crate) async fn require_plan(pool: &inkwell_db::DbPool, id: DbId) -> AppResult<PremiumPlan> {
    PremiumPlanRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PremiumPlan",
            id,
        }))
}

/// GET /api/v1/premium-plans/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PremiumPlan>>> {
    let plan = require_plan(&state.pool, id).await?;
    Ok(Json(DataResponse { data: plan }))
}
