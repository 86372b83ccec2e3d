//! Route definitions for the `/cart` resource.
//!
//! Per-user cart listing and add/remove live under `/users/{id}/cart`.

use axum::routing::patch;
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/cart`.
///
/// ```text
/// PATCH  /{id}/reduce    -> reduce
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/reduce", patch(cart::reduce))
}
