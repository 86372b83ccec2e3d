//! Route definitions for the `/comics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::comic;
use crate::state::AppState;

/// Routes mounted at `/comics`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// GET    /{id}/chapters       -> list_chapters
/// POST   /{id}/chapters       -> create_chapter
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comic::list).post(comic::create))
        .route(
            "/{id}",
            get(comic::get_by_id)
                .put(comic::update)
                .delete(comic::delete),
        )
        .route(
            "/{id}/chapters",
            get(comic::list_chapters).post(comic::create_chapter),
        )
}
