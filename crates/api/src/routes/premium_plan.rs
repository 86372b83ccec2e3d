//! Route definitions for the `/premium-plans` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::premium_plan;
use crate::state::AppState;

/// Routes mounted at `/premium-plans`.
///
/// ```text
/// GET    /        -> list
/// GET    /{id}    -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(premium_plan::list))
        .route("/{id}", get(premium_plan::get_by_id))
}
