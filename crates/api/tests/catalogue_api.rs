//! HTTP-level tests for comics, chapters and page images.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{body_json, create_chapter, create_comic, delete, get, post_json, put_json};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "inkwell-test-boundary";

/// Encode `(filename, contents)` image parts plus plain text fields as a
/// multipart/form-data body.
fn multipart_body(files: &[(&str, &str)], fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, data) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"images\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    pool: &PgPool,
    chapter_id: i64,
    files: &[(&str, &str)],
    fields: &[(&str, &str)],
) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/chapters/{chapter_id}/pages"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(files, fields)))
        .unwrap();
    common::build_test_app(pool.clone())
        .oneshot(request)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Comics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comic_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comics",
        serde_json::json!({
            "comic_name": "Night Harbor",
            "author": "R. Vale",
            "genre": ["Mystery", "Drama"],
            "status": "ongoing",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["comic_name"], "Night Harbor");
    assert_eq!(json["data"]["status"], "ongoing");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_comic_rejects_unknown_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comics",
        serde_json::json!({"comic_name": "X", "author": "Y", "status": "paused"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_comic_name_returns_409(pool: PgPool) {
    create_comic(&pool, "Twice").await;
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/comics",
        serde_json::json!({"comic_name": "Twice", "author": "Someone"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_comic_changes_only_given_fields(pool: PgPool) {
    let id = create_comic(&pool, "Before").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/comics/{id}"),
        serde_json::json!({"comic_name": "After"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["comic_name"], "After");
    assert_eq!(json["data"]["author"], "A. Artist");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_comic_removes_its_chapters(pool: PgPool) {
    let id = create_comic(&pool, "Gone").await;
    let chapter_id = create_chapter(&pool, id, 1).await;

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/comics/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool.clone()), &format!("/api/v1/comics/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/chapters/{chapter_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Chapters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_chapters_are_listed_in_number_order(pool: PgPool) {
    let comic_id = create_comic(&pool, "Ordered").await;
    create_chapter(&pool, comic_id, 3).await;
    create_chapter(&pool, comic_id, 1).await;
    create_chapter(&pool, comic_id, 2).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/comics/{comic_id}/chapters"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let numbers: Vec<i64> = json["data"]["chapters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["chapter_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(json["data"]["comic_name"], "Ordered");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_chapter_number_returns_409(pool: PgPool) {
    let comic_id = create_comic(&pool, "Dupes").await;
    create_chapter(&pool, comic_id, 1).await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/comics/{comic_id}/chapters"),
        serde_json::json!({"chapter_number": 1, "title": "Again"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_chapter_for_missing_comic_returns_404(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/comics/999999/chapters",
        serde_json::json!({"chapter_number": 1, "title": "Orphan"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_navigation_skips_gaps_in_numbering(pool: PgPool) {
    let comic_id = create_comic(&pool, "Gaps").await;
    let first = create_chapter(&pool, comic_id, 1).await;
    let middle = create_chapter(&pool, comic_id, 4).await;
    let last = create_chapter(&pool, comic_id, 9).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/chapters/{middle}/navigation"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["previous_chapter"]["chapter_id"], first);
    assert_eq!(json["data"]["next_chapter"]["chapter_id"], last);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/chapters/{last}/navigation"),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"]["next_chapter"].is_null());
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_orders_pages_by_file_number(pool: PgPool) {
    let comic_id = create_comic(&pool, "Pages").await;
    let chapter_id = create_chapter(&pool, comic_id, 1).await;

    let response = upload(
        &pool,
        chapter_id,
        &[("10.png", "ten"), ("2.png", "two"), ("1.jpg", "one")],
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["page_count"], 3);
    assert_eq!(json["data"]["uploaded"][0]["filename"], "1.jpg");
    assert_eq!(json["data"]["uploaded"][2]["filename"], "10.png");

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/chapters/{chapter_id}/pages/3"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ten");

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/chapters/{chapter_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["page_count"], 3);
    assert_eq!(
        json["data"]["image_path"],
        format!("/api/v1/chapters/{chapter_id}/pages/1")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_upload_appends_after_existing_pages(pool: PgPool) {
    let comic_id = create_comic(&pool, "Append").await;
    let chapter_id = create_chapter(&pool, comic_id, 1).await;
    upload(&pool, chapter_id, &[("1.png", "a"), ("2.png", "b")], &[]).await;

    let response = upload(&pool, chapter_id, &[("1.png", "c")], &[]).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["uploaded"][0]["page_number"], 3);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/chapters/{chapter_id}/pages"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["pages"], serde_json::json!([1, 2, 3]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_explicit_page_number_replaces_page(pool: PgPool) {
    let comic_id = create_comic(&pool, "Replace").await;
    let chapter_id = create_chapter(&pool, comic_id, 1).await;
    upload(&pool, chapter_id, &[("1.png", "old")], &[]).await;

    let response = upload(&pool, chapter_id, &[("fixed.webp", "new")], &[("page_number", "1")]).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["page_count"], 1);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/chapters/{chapter_id}/pages/1"),
    )
    .await;
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/webp");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"new");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_without_images_returns_400(pool: PgPool) {
    let comic_id = create_comic(&pool, "Empty").await;
    let chapter_id = create_chapter(&pool, comic_id, 1).await;

    let response = upload(&pool, chapter_id, &[("notes.txt", "hello")], &[]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_file_names_return_400(pool: PgPool) {
    let comic_id = create_comic(&pool, "Twins").await;
    let chapter_id = create_chapter(&pool, comic_id, 1).await;

    let response = upload(&pool, chapter_id, &[("1.png", "a"), ("1.png", "b")], &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/chapters/{chapter_id}/pages"),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["pages"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_pages_clears_chapter(pool: PgPool) {
    let comic_id = create_comic(&pool, "Wipe").await;
    let chapter_id = create_chapter(&pool, comic_id, 1).await;
    upload(&pool, chapter_id, &[("1.png", "a"), ("2.png", "b")], &[]).await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/chapters/{chapter_id}/pages"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["deleted"], 2);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/chapters/{chapter_id}/pages/1"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
