pub mod cart;
pub mod chapter;
pub mod comic;
pub mod comment;
pub mod health;
pub mod history;
pub mod notification;
pub mod payment;
pub mod premium_plan;
pub mod product;
pub mod receipt;
pub mod thread;
pub mod user;
pub mod waitlist;

use axum::routing::post;
use axum::Router;

use crate::handlers::{access, subscription};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                            list, create
/// /users/{id}                                       get
/// /users/{id}/points                                set/add/deduct points (PUT)
/// /users/{id}/status                                update status (PUT)
/// /users/{id}/comics/{comic_id}/chapters            chapter list with access flags
/// /users/{id}/chapters/{chapter_id}/access          access decision
/// /users/{id}/chapters/{chapter_id}/unlock          spend points to unlock (POST)
/// /users/{id}/history                               reading history
/// /users/{id}/cart                                  cart contents
/// /users/{id}/cart/{product_id}                     add (POST), remove (DELETE)
/// /users/{id}/checkout                              pay for the cart (POST)
/// /users/{id}/waitlist/{product_id}                 join waitlist (POST)
/// /users/{id}/notifications                         inbox
/// /users/{id}/receipts                              payment history
///
/// /comics                                           list, create
/// /comics/{id}                                      get, update, delete
/// /comics/{id}/chapters                             list, create
///
/// /chapters/{id}                                    chapter detail
/// /chapters/{id}/pages                              list, upload, delete all
/// /chapters/{id}/pages/{page_number}                page image
/// /chapters/{id}/navigation                         previous/next chapter
/// /chapters/{id}/threads                            discussion threads
///
/// /history                                          list, record
///
/// /products                                         list, create
/// /products/{id}                                    get
/// /products/{id}/restock                            add stock (POST)
///
/// /cart/{id}/reduce                                 reduce quantity (PATCH)
///
/// /waitlist                                         list (queue order)
/// /waitlist/{id}                                    delete
/// /waitlist/fulfil                                  status (GET), trigger (POST)
///
/// /threads                                          list, create
/// /threads/{id}/status                              update status (PUT)
/// /threads/{id}/like                                like (POST)
/// /threads/{id}/comments                            list, create
/// /threads/{id}/comments/count                      comment count
///
/// /comments/{id}/replies                            replies
/// /comments/{id}/like                               like (POST)
///
/// /notifications                                    create
/// /notifications/{id}                               get
///
/// /receipts                                         create
/// /receipts/{id}                                    get
/// /receipts/transaction/{transaction_id}            get by payment reference
///
/// /premium-plans                                    list
/// /premium-plans/{id}                               get
///
/// /payments/intents                                 create payment intent (POST)
///
/// /subscriptions                                    start purchase (POST)
/// /subscriptions/complete                           apply paid plan (POST)
///
/// /access-cache/clear                               drop cached chapter lists (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Readers, plus everything scoped to one reader.
        .nest("/users", user::router())
        // Catalogue.
        .nest("/comics", comic::router())
        .nest("/chapters", chapter::router())
        .nest("/history", history::router())
        // Shop.
        .nest("/products", product::router())
        .nest("/cart", cart::router())
        .nest("/waitlist", waitlist::router())
        // Community.
        .nest("/threads", thread::router())
        .nest("/comments", comment::router())
        .nest("/notifications", notification::router())
        // Billing.
        .nest("/receipts", receipt::router())
        .nest("/premium-plans", premium_plan::router())
        .nest("/payments", payment::router())
        .route("/subscriptions", post(subscription::create))
        .route("/subscriptions/complete", post(subscription::complete))
        .route("/access-cache/clear", post(access::clear_cache))
}
