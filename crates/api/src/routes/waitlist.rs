//! Route definitions for the `/waitlist` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::waitlist;
use crate::state::AppState;

/// Routes mounted at `/waitlist`.
///
/// ```text
/// GET    /          -> list
/// GET    /fulfil    -> fulfilment_status
/// POST   /fulfil    -> trigger_fulfilment
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(waitlist::list))
        .route(
            "/fulfil",
            get(waitlist::fulfilment_status).post(waitlist::trigger_fulfilment),
        )
        .route("/{id}", delete(waitlist::delete))
}
