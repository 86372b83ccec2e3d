//! Route definitions for the `/receipts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::receipt;
use crate::state::AppState;

/// Routes mounted at `/receipts`.
///
/// ```text
/// POST   /                                 -> create
/// GET    /{id}                             -> get_by_id
/// GET    /transaction/{transaction_id}     -> get_by_transaction
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(receipt::create))
        .route("/{id}", get(receipt::get_by_id))
        .route(
            "/transaction/{transaction_id}",
            get(receipt::get_by_transaction),
        )
}
