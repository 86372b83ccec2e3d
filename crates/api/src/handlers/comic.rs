//! Handlers for the `/comics` resource and its chapters.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inkwell_core::error::CoreError;
use inkwell_core::status::ComicStatus;
use inkwell_core::types::DbId;
use inkwell_db::models::chapter::{Chapter, CreateChapter};
use inkwell_db::models::comic::{Comic, CreateComic, UpdateComic};
use inkwell_db::repositories::{ChapterRepo, ComicRepo};
use serde::Serialize;

use super::validated;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A comic's chapter listing.
#[derive(Debug, Serialize)]
pub struct ComicChapters {
    pub comic_id: DbId,
    pub comic_name: String,
    pub chapters: Vec<Chapter>,
}

fn check_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        status.parse::<ComicStatus>().map_err(CoreError::Validation)?;
    }
    Ok(())
}

pub(crate) async fn require_comic(pool: &inkwell_db::DbPool, id: DbId) -> AppResult<Comic> {
    ComicRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comic",
            id,
        }))
}

/// POST /api/v1/comics
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateComic>,
) -> AppResult<(StatusCode, Json<DataResponse<Comic>>)> {
    let input = validated(input)?;
    check_status(input.status.as_deref())?;
    let comic = ComicRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comic })))
}

/// GET /api/v1/comics
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Comic>>>> {
    let comics = ComicRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: comics }))
}

/// GET /api/v1/comics/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Comic>>> {
    let comic = require_comic(&state.pool, id).await?;
    Ok(Json(DataResponse { data: comic }))
}

/// PUT /api/v1/comics/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComic>,
) -> AppResult<Json<DataResponse<Comic>>> {
    let input = validated(input)?;
    check_status(input.status.as_deref())?;
    let comic = ComicRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comic",
            id,
        }))?;
    Ok(Json(DataResponse { data: comic }))
}

/// DELETE /api/v1/comics/{id}
///
/// Cascades to chapters, pages, threads and reading history.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if !ComicRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comic",
            id,
        }));
    }
    state.access_cache.lock().await.invalidate(&id);
    tracing::info!(comic_id = id, "Comic deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/comics/{id}/chapters
pub async fn list_chapters(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ComicChapters>>> {
    let comic = require_comic(&state.pool, id).await?;
    let chapters = ChapterRepo::list_by_comic(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ComicChapters {
            comic_id: comic.id,
            comic_name: comic.comic_name,
            chapters,
        },
    }))
}

/// POST /api/v1/comics/{id}/chapters
///
/// Chapter numbers are unique per comic (409 on a duplicate).
pub async fn create_chapter(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateChapter>,
) -> AppResult<(StatusCode, Json<DataResponse<Chapter>>)> {
    let input = validated(input)?;
    require_comic(&state.pool, id).await?;

    let chapter = ChapterRepo::create(&state.pool, id, &input).await?;
    state.access_cache.lock().await.invalidate(&id);

    tracing::info!(
        comic_id = id,
        chapter_id = chapter.id,
        chapter_number = chapter.chapter_number,
        "Chapter created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: chapter })))
}
