//! Route definitions for the `/chapters` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::chapter;
use crate::state::AppState;

/// Upper bound for one multipart page upload request.
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Routes mounted at `/chapters`.
///
/// ```text
/// GET    /{id}                        -> get_by_id
/// GET    /{id}/pages                  -> list_pages
/// POST   /{id}/pages                  -> upload_pages (multipart)
/// DELETE /{id}/pages                  -> delete_pages
/// GET    /{id}/pages/{page_number}    -> get_page_image
/// GET    /{id}/navigation             -> navigation
/// GET    /{id}/threads                -> list_threads
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(chapter::get_by_id))
        .route(
            "/{id}/pages",
            get(chapter::list_pages)
                .post(chapter::upload_pages)
                .delete(chapter::delete_pages)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/{id}/pages/{page_number}", get(chapter::get_page_image))
        .route("/{id}/navigation", get(chapter::navigation))
        .route("/{id}/threads", get(chapter::list_threads))
}
