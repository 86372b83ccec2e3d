//! Premium subscription purchase.
//!
//! A subscription is bought in two calls: `POST /subscriptions` opens a
//! payment intent for the plan price, and `POST /subscriptions/complete`
//! applies the plan once the provider reports the intent as succeeded.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::premium::SUBSCRIBER_POINTS;
use inkwell_core::status::{PlanDuration, SubscriberStatus};
use inkwell_core::types::DbId;
use inkwell_db::models::premium_plan::PremiumPlan;
use inkwell_db::models::receipt::{CreateReceipt, Receipt};
use inkwell_db::models::user::User;
use inkwell_db::repositories::{ReceiptRepo, UserRepo};
use inkwell_events::{event_types, PlatformEvent};
use inkwell_payments::{IntentStatus, PaymentIntent};
use serde::{Deserialize, Serialize};

use super::premium_plan::require_plan;
use super::require_user;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// `purpose` metadata tag on intents opened by [`create`].
const SUBSCRIPTION_PURPOSE: &str = "subscription";

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub user_id: DbId,
    pub plan_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionIntent {
    pub client_secret: Option<String>,
    pub payment_intent_id: String,
    pub plan_details: PremiumPlan,
    /// Plan price in cents.
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct CompleteSubscriptionRequest {
    pub user_id: DbId,
    pub plan_id: DbId,
    pub payment_intent_id: String,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionActivated {
    pub user: User,
    pub receipt: Receipt,
}

/// POST /api/v1/subscriptions
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SubscriptionIntent>>)> {
    require_user(&state.pool, input.user_id).await?;
    let plan = require_plan(&state.pool, input.plan_id).await?;

    let metadata = BTreeMap::from([
        ("user_id".to_string(), input.user_id.to_string()),
        ("plan_id".to_string(), plan.id.to_string()),
        ("purpose".to_string(), SUBSCRIPTION_PURPOSE.to_string()),
    ]);
    let intent = state
        .payments
        .create_intent(plan.price_cents, metadata)
        .await?;

    tracing::info!(
        user_id = input.user_id,
        plan_id = plan.id,
        payment_intent_id = %intent.id,
        "Subscription payment started"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubscriptionIntent {
                client_secret: intent.client_secret,
                payment_intent_id: intent.id,
                amount: plan.price_cents,
                plan_details: plan,
            },
        }),
    ))
}

/// Reject intents that were not opened by [`create`] for this user and plan.
fn check_intent_owner(
    intent: &PaymentIntent,
    user_id: DbId,
    plan_id: DbId,
) -> Result<(), CoreError> {
    let matches = intent.metadata_value("purpose") == Some(SUBSCRIPTION_PURPOSE)
        && intent.metadata_value("user_id") == Some(user_id.to_string().as_str())
        && intent.metadata_value("plan_id") == Some(plan_id.to_string().as_str());
    if matches {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Payment {} was not opened for plan {plan_id} by user {user_id}",
            intent.id
        )))
    }
}

/// POST /api/v1/subscriptions/complete
///
/// Verifies the intent was opened by this user for this plan and succeeded
/// for the plan price, then grants subscriber points, sets the subscriber
/// tier and writes the receipt in one transaction. Each payment intent can be applied once (409 on replay).
pub async fn complete(
    State(state): State<AppState>,
    Json(input): Json<CompleteSubscriptionRequest>,
) -> AppResult<Json<DataResponse<SubscriptionActivated>>> {
    let plan = require_plan(&state.pool, input.plan_id).await?;

    if ReceiptRepo::find_by_transaction(&state.pool, &input.payment_intent_id)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(format!(
            "Payment {} has already been applied",
            input.payment_intent_id
        ))
        .into());
    }

    let intent = state
        .payments
        .retrieve_intent(&input.payment_intent_id)
        .await?;
    check_intent_owner(&intent, input.user_id, plan.id)?;
    if intent.status != IntentStatus::Succeeded {
        return Err(CoreError::Validation(format!(
            "Payment {} has not succeeded (status: {:?})",
            intent.id, intent.status
        ))
        .into());
    }
    if intent.amount_cents != plan.price_cents {
        return Err(CoreError::Validation(format!(
            "Payment amount {} does not match plan price {}",
            intent.amount_cents, plan.price_cents
        ))
        .into());
    }

    let duration: PlanDuration = plan
        .duration
        .parse()
        .map_err(AppError::InternalError)?;
    let tier = SubscriberStatus::from(duration);

    let mut tx = state.pool.begin().await?;
    let user = UserRepo::activate_subscription(&mut *tx, input.user_id, tier, SUBSCRIBER_POINTS)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;
    let receipt = ReceiptRepo::create(
        &mut *tx,
        &CreateReceipt {
            user_id: user.id,
            transaction_id: intent.id.clone(),
            payment_method: None,
            current_points: user.points,
            subscriber_status: Some(tier.as_str().to_string()),
            billing_address: user.address.clone(),
            total_cents: plan.price_cents,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        user_id = user.id,
        plan = %plan.name,
        receipt_id = receipt.id,
        "Subscription activated"
    );
    state.event_bus.publish(
        PlatformEvent::new(event_types::SUBSCRIPTION_ACTIVATED)
            .with_source("receipt", receipt.id)
            .with_actor(user.id)
            .with_payload(serde_json::json!({
                "plan_name": plan.name,
                "duration": plan.duration,
                "transaction_id": receipt.transaction_id,
            })),
    );

    Ok(Json(DataResponse {
        data: SubscriptionActivated { user, receipt },
    }))
}
