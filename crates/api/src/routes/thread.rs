//! Route definitions for the `/threads` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::thread;
use crate::state::AppState;

/// Routes mounted at `/threads`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create
/// PUT    /{id}/status            -> update_status
/// POST   /{id}/like              -> like
/// GET    /{id}/comments          -> list_comments
/// POST   /{id}/comments          -> create_comment
/// GET    /{id}/comments/count    -> comment_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(thread::list).post(thread::create))
        .route("/{id}/status", put(thread::update_status))
        .route("/{id}/like", post(thread::like))
        .route(
            "/{id}/comments",
            get(thread::list_comments).post(thread::create_comment),
        )
        .route("/{id}/comments/count", get(thread::comment_count))
}
