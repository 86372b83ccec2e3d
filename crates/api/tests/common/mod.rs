#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use inkwell_api::config::ServerConfig;
use inkwell_api::router::build_app_router;
use inkwell_api::state::AppState;
use inkwell_core::points::DEFAULT_UNLOCK_COST;
use inkwell_events::EventBus;
use inkwell_payments::MockGateway;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Waitlist pacing is zero so fulfilment runs finish immediately.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        access_cache_ttl_secs: 300,
        waitlist_pacing_ms: 0,
        chapter_unlock_cost: DEFAULT_UNLOCK_COST,
        reader_page_url: "chapter-reader.html".to_string(),
    }
}

/// Build the full application router backed by a fresh mock gateway.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(MockGateway::default()))
}

/// Build the full application router with a caller-owned mock gateway, so
/// tests can steer payment intent statuses.
pub fn build_test_app_with(pool: PgPool, gateway: Arc<MockGateway>) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone(), Arc::new(EventBus::default()), gateway);
    build_app_router(state, &config)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers (go through the API so the same validation applies)
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, email: &str, points: i64) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/users",
        serde_json::json!({
            "name": "Reader",
            "email": email,
            "address": "1 Ink Street",
            "points": points,
        }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

pub async fn create_comic(pool: &PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/comics",
        serde_json::json!({"comic_name": name, "author": "A. Artist"}),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

pub async fn create_chapter(pool: &PgPool, comic_id: i64, number: i32) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/comics/{comic_id}/chapters"),
        serde_json::json!({"chapter_number": number, "title": format!("Chapter {number}")}),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

pub async fn create_product(pool: &PgPool, volume: &str, price_cents: i64, stock: i32) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/products",
        serde_json::json!({
            "comic_name": "Night Harbor",
            "volume_name": volume,
            "price_cents": price_cents,
            "quantity_in_stock": stock,
        }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
