//! HTTP-level tests for premium plans, payment intents, subscriptions and
//! receipts. Payments go through the in-memory mock gateway.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, create_product, create_user, get, post, post_json};
use inkwell_core::premium::SUBSCRIBER_POINTS;
use inkwell_payments::{IntentStatus, MockGateway};
use sqlx::PgPool;

async fn plan_id(pool: &PgPool, duration: &str) -> i64 {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/premium-plans").await;
    let json = body_json(response).await;
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["duration"] == duration)
        .and_then(|p| p["id"].as_i64())
        .unwrap()
}

/// Start a subscription purchase and return the payment intent id.
async fn start_subscription(
    pool: &PgPool,
    gateway: &Arc<MockGateway>,
    user_id: i64,
    plan_id: i64,
) -> String {
    let response = post_json(
        common::build_test_app_with(pool.clone(), Arc::clone(gateway)),
        "/api/v1/subscriptions",
        serde_json::json!({"user_id": user_id, "plan_id": plan_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["payment_intent_id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn complete(
    pool: &PgPool,
    gateway: &Arc<MockGateway>,
    body: serde_json::Value,
) -> axum::http::Response<axum::body::Body> {
    post_json(
        common::build_test_app_with(pool.clone(), Arc::clone(gateway)),
        "/api/v1/subscriptions/complete",
        body,
    )
    .await
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeded_plans_are_listed_by_price(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/premium-plans").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let durations: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["duration"].as_str().unwrap())
        .collect();
    assert_eq!(durations, vec!["MONTHLY", "QUARTERLY", "YEARLY"]);
    assert!(json["data"][0]["features"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_plan_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/premium-plans/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Payment intents
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_intent_returns_client_secret(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/payments/intents",
        serde_json::json!({"amount": 1500}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["payment_intent_id"].as_str().unwrap();
    assert_eq!(
        json["data"]["client_secret"],
        format!("{id}_secret_mock")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_zero_amount_intent_returns_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/payments/intents",
        serde_json::json!({"amount": 0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subscription_intent_carries_plan_price(pool: PgPool) {
    let user_id = create_user(&pool, "sub@example.com", 0).await;
    let plan_id = plan_id(&pool, "QUARTERLY").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/subscriptions",
        serde_json::json!({"user_id": user_id, "plan_id": plan_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["amount"], 2499);
    assert_eq!(json["data"]["plan_details"]["name"], "Quarterly Premium");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completing_subscription_grants_points_and_writes_receipt(pool: PgPool) {
    let gateway = Arc::new(MockGateway::default());
    let user_id = create_user(&pool, "paid@example.com", 5).await;
    let plan_id = plan_id(&pool, "MONTHLY").await;
    let intent_id = start_subscription(&pool, &gateway, user_id, plan_id).await;

    let response = complete(
        &pool,
        &gateway,
        serde_json::json!({"user_id": user_id, "plan_id": plan_id, "payment_intent_id": intent_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["points"], SUBSCRIBER_POINTS);
    assert_eq!(json["data"]["user"]["subscriber_status"], "MONTHLY");
    assert_eq!(json["data"]["receipt"]["transaction_id"], intent_id.as_str());
    assert_eq!(json["data"]["receipt"]["total_cents"], 999);
    assert_eq!(json["data"]["receipt"]["gst_cents"], 82);
    assert_eq!(json["data"]["receipt"]["billing_address"], "1 Ink Street");
    assert_eq!(json["data"]["receipt"]["payment_method"], "CREDIT_CARD");

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/receipts/transaction/{intent_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["user_id"], user_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replayed_payment_returns_409(pool: PgPool) {
    let gateway = Arc::new(MockGateway::default());
    let user_id = create_user(&pool, "twice@example.com", 0).await;
    let plan_id = plan_id(&pool, "YEARLY").await;
    let intent_id = start_subscription(&pool, &gateway, user_id, plan_id).await;
    let body = serde_json::json!({"user_id": user_id, "plan_id": plan_id, "payment_intent_id": intent_id});

    assert_eq!(complete(&pool, &gateway, body.clone()).await.status(), StatusCode::OK);
    assert_eq!(complete(&pool, &gateway, body).await.status(), StatusCode::CONFLICT);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/users/{user_id}/receipts"),
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unpaid_intent_is_rejected(pool: PgPool) {
    let gateway = Arc::new(MockGateway::default());
    let user_id = create_user(&pool, "pending@example.com", 7).await;
    let plan_id = plan_id(&pool, "MONTHLY").await;
    let intent_id = start_subscription(&pool, &gateway, user_id, plan_id).await;
    assert!(gateway.set_status(&intent_id, IntentStatus::RequiresPaymentMethod));

    let response = complete(
        &pool,
        &gateway,
        serde_json::json!({"user_id": user_id, "plan_id": plan_id, "payment_intent_id": intent_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = get(common::build_test_app(pool), &format!("/api/v1/users/{user_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["points"], 7);
    assert_eq!(json["data"]["subscriber_status"], "NONE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_untagged_payment_intent_is_rejected(pool: PgPool) {
    let gateway = Arc::new(MockGateway::default());
    let user_id = create_user(&pool, "cheap@example.com", 0).await;
    let plan_id = plan_id(&pool, "YEARLY").await;

    let response = post_json(
        common::build_test_app_with(pool.clone(), Arc::clone(&gateway)),
        "/api/v1/payments/intents",
        serde_json::json!({"amount": 100}),
    )
    .await;
    let intent_id = body_json(response).await["data"]["payment_intent_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = complete(
        &pool,
        &gateway,
        serde_json::json!({"user_id": user_id, "plan_id": plan_id, "payment_intent_id": intent_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_checkout_intent_cannot_activate_subscription(pool: PgPool) {
    let gateway = Arc::new(MockGateway::default());
    let user_id = create_user(&pool, "shopper@example.com", 3).await;
    let plan_id = plan_id(&pool, "MONTHLY").await;
    // Same price as the monthly plan.
    let product_id = create_product(&pool, "Vol. 1", 999, 5).await;

    let response = post(
        common::build_test_app_with(pool.clone(), Arc::clone(&gateway)),
        &format!("/api/v1/users/{user_id}/cart/{product_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = post(
        common::build_test_app_with(pool.clone(), Arc::clone(&gateway)),
        &format!("/api/v1/users/{user_id}/checkout"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let intent_id = body_json(response).await["data"]["payment_intent_id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = complete(
        &pool,
        &gateway,
        serde_json::json!({"user_id": user_id, "plan_id": plan_id, "payment_intent_id": intent_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = get(common::build_test_app(pool), &format!("/api/v1/users/{user_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["points"], 3);
    assert_eq!(json["data"]["subscriber_status"], "NONE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_users_intent_is_rejected(pool: PgPool) {
    let gateway = Arc::new(MockGateway::default());
    let payer_id = create_user(&pool, "payer@example.com", 0).await;
    let other_id = create_user(&pool, "other@example.com", 0).await;
    let plan_id = plan_id(&pool, "QUARTERLY").await;
    let intent_id = start_subscription(&pool, &gateway, payer_id, plan_id).await;

    let response = complete(
        &pool,
        &gateway,
        serde_json::json!({"user_id": other_id, "plan_id": plan_id, "payment_intent_id": intent_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/users/{other_id}"),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["subscriber_status"], "NONE");

    // The payer can still apply their own payment.
    let response = complete(
        &pool,
        &gateway,
        serde_json::json!({"user_id": payer_id, "plan_id": plan_id, "payment_intent_id": intent_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_intent_for_another_plan_is_rejected(pool: PgPool) {
    let gateway = Arc::new(MockGateway::default());
    let user_id = create_user(&pool, "switch@example.com", 0).await;
    let monthly = plan_id(&pool, "MONTHLY").await;
    let yearly = plan_id(&pool, "YEARLY").await;
    let intent_id = start_subscription(&pool, &gateway, user_id, monthly).await;

    let response = complete(
        &pool,
        &gateway,
        serde_json::json!({"user_id": user_id, "plan_id": yearly, "payment_intent_id": intent_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_intent_returns_404(pool: PgPool) {
    let gateway = Arc::new(MockGateway::default());
    let user_id = create_user(&pool, "who@example.com", 0).await;
    let plan_id = plan_id(&pool, "MONTHLY").await;

    let response = complete(
        &pool,
        &gateway,
        serde_json::json!({"user_id": user_id, "plan_id": plan_id, "payment_intent_id": "pi_nope"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Receipts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_manual_receipt_derives_gst(pool: PgPool) {
    let user_id = create_user(&pool, "manual@example.com", 0).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/receipts",
        serde_json::json!({
            "user_id": user_id,
            "transaction_id": "txn_manual_1",
            "payment_method": "PAYNOW",
            "total_cents": 10900,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["gst_cents"], 900);
    assert_eq!(json["data"]["subscriber_status"], "NONE");
    let id = json["data"]["id"].as_i64().unwrap();

    let response = get(common::build_test_app(pool), &format!("/api/v1/receipts/{id}")).await;
    assert_eq!(body_json(response).await["data"]["payment_method"], "PAYNOW");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_receipt_for_very_large_total(pool: PgPool) {
    let user_id = create_user(&pool, "whale@example.com", 0).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/receipts",
        serde_json::json!({
            "user_id": user_id,
            "transaction_id": "txn_large",
            "total_cents": 20_000_000_000_000_000_i64,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["gst_cents"], 1_651_376_146_788_991_i64);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_receipt_with_unknown_tier_returns_400(pool: PgPool) {
    let user_id = create_user(&pool, "tier@example.com", 0).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/receipts",
        serde_json::json!({
            "user_id": user_id,
            "transaction_id": "txn_bad_tier",
            "subscriber_status": "WEEKLY",
            "total_cents": 100,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_transaction_returns_404(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/api/v1/receipts/transaction/txn_missing",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
