//! Handlers for the `/chapters` resource: details, pages and navigation.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use inkwell_core::access;
use inkwell_core::error::CoreError;
use inkwell_core::pages::{content_type_for, is_allowed_image, sort_page_files};
use inkwell_core::types::DbId;
use inkwell_db::models::chapter::Chapter;
use inkwell_db::models::page::NewPage;
use inkwell_db::models::thread::Thread;
use inkwell_db::repositories::{ChapterRepo, PageRepo, ThreadRepo};
use serde::Serialize;

use super::comic::require_comic;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A chapter with its comic's name and stored page count.
#[derive(Debug, Serialize)]
pub struct ChapterDetail {
    #[serde(flatten)]
    pub chapter: Chapter,
    pub comic_name: String,
    pub page_count: i64,
}

#[derive(Debug, Serialize)]
pub struct ChapterPages {
    pub chapter_id: DbId,
    pub comic_id: DbId,
    pub comic_name: String,
    pub chapter_number: i32,
    pub title: String,
    /// Stored page numbers in reading order.
    pub pages: Vec<i32>,
    pub page_count: usize,
}

#[derive(Debug, Serialize)]
pub struct NavLink {
    pub chapter_id: DbId,
    pub chapter_number: i32,
    pub title: String,
}

impl From<&access::ChapterRef> for NavLink {
    fn from(chapter: &access::ChapterRef) -> Self {
        NavLink {
            chapter_id: chapter.id,
            chapter_number: chapter.chapter_number,
            title: chapter.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterNavigation {
    pub current_chapter_id: DbId,
    pub current_chapter_number: i32,
    pub comic_id: DbId,
    pub previous_chapter: Option<NavLink>,
    pub next_chapter: Option<NavLink>,
}

#[derive(Debug, Serialize)]
pub struct UploadedPage {
    pub page_number: i32,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct PageUpload {
    pub chapter_id: DbId,
    pub uploaded: Vec<UploadedPage>,
    /// File names skipped for having a disallowed extension.
    pub rejected: Vec<String>,
    pub page_count: i64,
}

#[derive(Debug, Serialize)]
pub struct PagesDeleted {
    pub chapter_id: DbId,
    pub deleted: u64,
}

pub(crate) async fn require_chapter(pool: &inkwell_db::DbPool, id: DbId) -> AppResult<Chapter> {
    ChapterRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Chapter",
            id,
        }))
}

/// GET /api/v1/chapters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChapterDetail>>> {
    let chapter = require_chapter(&state.pool, id).await?;
    let comic = require_comic(&state.pool, chapter.comic_id).await?;
    let page_count = ChapterRepo::page_count(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ChapterDetail {
            chapter,
            comic_name: comic.comic_name,
            page_count,
        },
    }))
}

/// GET /api/v1/chapters/{id}/pages
pub async fn list_pages(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChapterPages>>> {
    let chapter = require_chapter(&state.pool, id).await?;
    let comic = require_comic(&state.pool, chapter.comic_id).await?;
    let pages = PageRepo::list_numbers(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ChapterPages {
            chapter_id: chapter.id,
            comic_id: comic.id,
            comic_name: comic.comic_name,
            chapter_number: chapter.chapter_number,
            title: chapter.title,
            page_count: pages.len(),
            pages,
        },
    }))
}

/// GET /api/v1/chapters/{id}/pages/{page_number}
///
/// Raw image bytes with the stored content type.
pub async fn get_page_image(
    State(state): State<AppState>,
    Path((id, page_number)): Path<(DbId, i32)>,
) -> AppResult<Response> {
    let page = PageRepo::find_image(&state.pool, id, page_number)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_number.into(),
        }))?;
    Ok(([(header::CONTENT_TYPE, page.content_type)], page.image).into_response())
}

/// POST /api/v1/chapters/{id}/pages
///
/// Multipart upload. Every `images` field is a page file. Without a
/// `page_number` field the files are sorted by name and appended after the
/// last stored page; with one, exactly one image is written at that number
/// (replacing any existing page). Two files with the same name are a 400.
pub async fn upload_pages(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<PageUpload>>)> {
    let chapter = require_chapter(&state.pool, id).await?;

    let mut files: HashMap<String, Vec<u8>> = HashMap::new();
    let mut rejected = Vec::new();
    let mut page_number: Option<i32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "images" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !is_allowed_image(&filename) || data.is_empty() {
                    rejected.push(filename);
                    continue;
                }
                match files.entry(filename) {
                    Entry::Vacant(slot) => {
                        slot.insert(data.to_vec());
                    }
                    Entry::Occupied(slot) => {
                        return Err(AppError::BadRequest(format!(
                            "Duplicate image file '{}'",
                            slot.key()
                        )));
                    }
                }
            }
            "page_number" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let n: i32 = text.trim().parse().map_err(|_| {
                    CoreError::Validation(format!("Invalid page_number '{text}'"))
                })?;
                if n < 1 {
                    return Err(CoreError::Validation("page_number must be at least 1".into()).into());
                }
                page_number = Some(n);
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(AppError::BadRequest(
            "No valid image files provided (allowed: png, jpg, jpeg, gif, webp)".into(),
        ));
    }
    if page_number.is_some() && files.len() != 1 {
        return Err(AppError::BadRequest(
            "Exactly one image is required when page_number is given".into(),
        ));
    }

    let mut names: Vec<String> = files.keys().cloned().collect();
    sort_page_files(&mut names);

    let mut tx = state.pool.begin().await?;
    let first = match page_number {
        Some(n) => n,
        None => PageRepo::max_page_number(&mut *tx, id).await? + 1,
    };

    let mut uploaded = Vec::with_capacity(names.len());
    for (offset, filename) in names.into_iter().enumerate() {
        let image = files.remove(&filename).unwrap_or_default();
        let page = NewPage {
            chapter_id: id,
            page_number: first + offset as i32,
            content_type: content_type_for(&filename).to_string(),
            image,
        };
        PageRepo::upsert(&mut *tx, &page).await?;
        uploaded.push(UploadedPage {
            page_number: page.page_number,
            filename,
        });
    }
    tx.commit().await?;

    if chapter.image_path.is_none() {
        ChapterRepo::set_image_path(&state.pool, id, &format!("/api/v1/chapters/{id}/pages/1"))
            .await?;
    }

    let page_count = ChapterRepo::page_count(&state.pool, id).await?;
    tracing::info!(
        chapter_id = id,
        uploaded = uploaded.len(),
        rejected = rejected.len(),
        "Chapter pages uploaded"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PageUpload {
                chapter_id: id,
                uploaded,
                rejected,
                page_count,
            },
        }),
    ))
}

/// DELETE /api/v1/chapters/{id}/pages
pub async fn delete_pages(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PagesDeleted>>> {
    require_chapter(&state.pool, id).await?;
    let mut conn = state.pool.acquire().await?;
    let deleted = PageRepo::delete_by_chapter(&mut conn, id).await?;
    tracing::info!(chapter_id = id, deleted, "Chapter pages deleted");
    Ok(Json(DataResponse {
        data: PagesDeleted {
            chapter_id: id,
            deleted,
        },
    }))
}

/// GET /api/v1/chapters/{id}/navigation
pub async fn navigation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChapterNavigation>>> {
    let chapter = require_chapter(&state.pool, id).await?;
    let siblings: Vec<access::ChapterRef> = ChapterRepo::list_by_comic(&state.pool, chapter.comic_id)
        .await?
        .iter()
        .map(Chapter::to_ref)
        .collect();

    let current = chapter.to_ref();
    let (prev, next) = access::navigation(&current, &siblings);

    Ok(Json(DataResponse {
        data: ChapterNavigation {
            current_chapter_id: chapter.id,
            current_chapter_number: chapter.chapter_number,
            comic_id: chapter.comic_id,
            previous_chapter: prev.map(NavLink::from),
            next_chapter: next.map(NavLink::from),
        },
    }))
}

/// GET /api/v1/chapters/{id}/threads
pub async fn list_threads(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Thread>>>> {
    require_chapter(&state.pool, id).await?;
    let threads = ThreadRepo::list_by_chapter(&state.pool, id).await?;
    Ok(Json(DataResponse { data: threads }))
}
