//! Route definitions for the `/users` resource.
//!
//! Everything owned by a single reader (access decisions, cart, history,
//! inbox, receipts) hangs off `/users/{id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{access, cart, checkout, history, notification, receipt, user, waitlist};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                                          -> list
/// POST   /                                          -> create
/// GET    /{id}                                      -> get_by_id
/// PUT    /{id}/points                               -> update_points
/// PUT    /{id}/status                               -> update_status
///
/// GET    /{id}/comics/{comic_id}/chapters           -> access::user_comic_chapters
/// GET    /{id}/chapters/{chapter_id}/access         -> access::chapter_access
/// POST   /{id}/chapters/{chapter_id}/unlock         -> access::unlock
///
/// GET    /{id}/history                              -> history::list_for_user
/// GET    /{id}/cart                                 -> cart::list_for_user
/// POST   /{id}/cart/{product_id}                    -> cart::add
/// DELETE /{id}/cart/{product_id}                    -> cart::remove
/// POST   /{id}/checkout                             -> checkout::checkout
/// POST   /{id}/waitlist/{product_id}                -> waitlist::join
/// GET    /{id}/notifications                        -> notification::list_for_user
/// GET    /{id}/receipts                             -> receipt::list_for_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list).post(user::create))
        .route("/{id}", get(user::get_by_id))
        .route("/{id}/points", put(user::update_points))
        .route("/{id}/status", put(user::update_status))
        .route(
            "/{id}/comics/{comic_id}/chapters",
            get(access::user_comic_chapters),
        )
        .route(
            "/{id}/chapters/{chapter_id}/access",
            get(access::chapter_access),
        )
        .route("/{id}/chapters/{chapter_id}/unlock", post(access::unlock))
        .route("/{id}/history", get(history::list_for_user))
        .route("/{id}/cart", get(cart::list_for_user))
        .route("/{id}/cart/{product_id}", post(cart::add).delete(cart::remove))
        .route("/{id}/checkout", post(checkout::checkout))
        .route("/{id}/waitlist/{product_id}", post(waitlist::join))
        .route("/{id}/notifications", get(notification::list_for_user))
        .route("/{id}/receipts", get(receipt::list_for_user))
}
