//! Route definitions for the `/products` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// POST   /{id}/restock      -> restock
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route("/{id}", get(product::get_by_id))
        .route("/{id}/restock", post(product::restock))
}
