//! Route definitions for the `/comments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// GET    /{id}/replies    -> list_replies
/// POST   /{id}/like       -> like
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/replies", get(comment::list_replies))
        .route("/{id}/like", post(comment::like))
}
