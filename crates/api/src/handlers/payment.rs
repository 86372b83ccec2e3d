//! Direct payment intent creation.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validated;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateIntentRequest {
    /// Amount in cents.
    #[validate(range(min = 1, message = "amount must be greater than zero"))]
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct IntentCreated {
    pub client_secret: Option<String>,
    pub payment_intent_id: String,
}

/// POST /api/v1/payments/intents
pub async fn create_intent(
    State(state): State<AppState>,
    Json(input): Json<CreateIntentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<IntentCreated>>)> {
    let input = validated(input)?;
    let intent = state
        .payments
        .create_intent(input.amount, BTreeMap::new())
        .await?;
    tracing::info!(payment_intent_id = %intent.id, amount_cents = input.amount, "Payment intent created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IntentCreated {
                client_secret: intent.client_secret,
                payment_intent_id: intent.id,
            },
        }),
    ))
}
