//! Cart checkout.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use inkwell_core::types::DbId;
use inkwell_db::repositories::CartRepo;
use inkwell_events::{event_types, PlatformEvent};
use serde::Serialize;

use super::require_user;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CheckoutResult {
    pub payment_intent_id: String,
    pub client_secret: Option<String>,
    pub amount_cents: i64,
    pub items_cleared: u64,
}

/// POST /api/v1/users/{id}/checkout
///
/// Empties the cart and opens a payment intent for the lines removed, in one
/// transaction. Lines added while the checkout runs stay in the cart.
/// Reserved stock stays sold.
pub async fn checkout(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CheckoutResult>>> {
    require_user(&state.pool, user_id).await?;

    let mut tx = state.pool.begin().await?;
    let lines = CartRepo::take_for_user(&mut *tx, user_id).await?;
    if lines.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }
    let amount_cents = lines
        .iter()
        .try_fold(0i64, |total, line| total.checked_add(line.line_total_cents))
        .ok_or_else(|| AppError::BadRequest("Cart total is too large".into()))?;
    let items_cleared = lines.len() as u64;

    let metadata = BTreeMap::from([
        ("user_id".to_string(), user_id.to_string()),
        ("purpose".to_string(), "checkout".to_string()),
    ]);
    let intent = state.payments.create_intent(amount_cents, metadata).await?;
    tx.commit().await?;

    tracing::info!(
        user_id,
        amount_cents,
        payment_intent_id = %intent.id,
        items_cleared,
        "Checkout completed"
    );
    state.event_bus.publish(
        PlatformEvent::new(event_types::CHECKOUT_COMPLETED)
            .with_actor(user_id)
            .with_payload(serde_json::json!({
                "payment_intent_id": intent.id,
                "amount_cents": amount_cents,
            })),
    );

    Ok(Json(DataResponse {
        data: CheckoutResult {
            payment_intent_id: intent.id,
            client_secret: intent.client_secret,
            amount_cents,
            items_cleared,
        },
    }))
}
