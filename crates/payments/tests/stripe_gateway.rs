//! Exercises `StripeGateway` against a local axum stand-in for the Stripe API.

use std::collections::BTreeMap;

use assert_matches::assert_matches;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use inkwell_payments::{IntentStatus, PaymentError, PaymentGateway, StripeGateway};
use serde_json::{json, Value};

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/v1/payment_intents", post(create_intent))
        .route("/v1/payment_intents/{id}", get(retrieve_intent));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

/// Echoes the parsed form back inside the intent so tests can inspect it.
async fn create_intent(headers: HeaderMap, body: String) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer sk_test_ok") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "Invalid API Key provided" } })),
        );
    }
    let amount: i64 = body
        .split('&')
        .find_map(|pair| pair.strip_prefix("amount="))
        .and_then(|v| v.parse().ok())
        .unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "id": "pi_123",
            "object": "payment_intent",
            "client_secret": "pi_123_secret_abc",
            "amount": amount,
            "currency": "usd",
            "status": "requires_payment_method",
            "description": body,
        })),
    )
}

async fn retrieve_intent(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id != "pi_123" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "No such payment_intent" } })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": "pi_123",
            "client_secret": "pi_123_secret_abc",
            "amount": 2499,
            "currency": "usd",
            "status": "succeeded",
            "metadata": { "plan_id": "2", "purpose": "subscription", "user_id": "7" },
        })),
    )
}

fn gateway(base: String, key: &str) -> StripeGateway {
    StripeGateway::new(key.into(), base, "usd".into()).unwrap()
}

// ---------------------------------------------------------------------------
// create_intent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_intent_returns_client_secret() {
    let base = spawn_stub().await;
    let mut metadata = BTreeMap::new();
    metadata.insert("user_id".to_string(), "7".to_string());

    let intent = gateway(base, "sk_test_ok")
        .create_intent(2499, metadata)
        .await
        .unwrap();

    assert_eq!(intent.id, "pi_123");
    assert_eq!(intent.client_secret.as_deref(), Some("pi_123_secret_abc"));
    assert_eq!(intent.amount_cents, 2499);
    assert_eq!(intent.status, IntentStatus::RequiresPaymentMethod);
}

#[tokio::test]
async fn test_api_error_message_is_extracted() {
    let base = spawn_stub().await;
    let result = gateway(base, "sk_test_bad")
        .create_intent(100, BTreeMap::new())
        .await;

    assert_matches!(
        result,
        Err(PaymentError::Api { status: 401, ref message }) if message == "Invalid API Key provided"
    );
}

#[tokio::test]
async fn test_non_positive_amount_is_rejected_before_any_request() {
    // Unroutable base: the call must fail on validation, not on the network.
    let result = gateway("http://127.0.0.1:9".into(), "sk_test_ok")
        .create_intent(-5, BTreeMap::new())
        .await;
    assert_matches!(result, Err(PaymentError::InvalidAmount(-5)));
}

// ---------------------------------------------------------------------------
// retrieve_intent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_retrieve_intent_reads_status() {
    let base = spawn_stub().await;
    let intent = gateway(base, "sk_test_ok")
        .retrieve_intent("pi_123")
        .await
        .unwrap();
    assert_eq!(intent.status, IntentStatus::Succeeded);
    assert_eq!(intent.metadata_value("purpose"), Some("subscription"));
    assert_eq!(intent.metadata_value("plan_id"), Some("2"));
}

#[tokio::test]
async fn test_retrieve_unknown_intent_is_not_found() {
    let base = spawn_stub().await;
    let result = gateway(base, "sk_test_ok").retrieve_intent("pi_nope").await;
    assert_matches!(result, Err(PaymentError::IntentNotFound(ref id)) if id == "pi_nope");
}
