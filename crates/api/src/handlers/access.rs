//! Reading access: chapter locks, single-chapter checks and unlocking
//! chapters with points.

use axum::extract::{Path, State};
use axum::Json;
use inkwell_core::access::{self, AccessDecision, ChapterAccess, ChapterRef};
use inkwell_core::error::CoreError;
use inkwell_core::points::PointsChange;
use inkwell_core::types::DbId;
use inkwell_db::models::chapter::Chapter;
use inkwell_db::repositories::{ChapterRepo, HistoryRepo, UserRepo};
use inkwell_events::{event_types, PlatformEvent};
use serde::Serialize;

use super::chapter::require_chapter;
use super::comic::require_comic;
use super::require_user;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserComicChapters {
    pub user_id: DbId,
    pub comic_id: DbId,
    pub comic_name: String,
    pub chapters: Vec<ChapterAccess>,
}

#[derive(Debug, Serialize)]
pub struct ChapterAccessResponse {
    pub user_id: DbId,
    pub chapter_id: DbId,
    #[serde(flatten)]
    pub decision: AccessDecision,
}

#[derive(Debug, Serialize)]
pub struct UnlockResult {
    pub chapter_id: DbId,
    pub redirect_url: String,
    pub points_remaining: i64,
    /// Points taken for this call; zero when the chapter was already open.
    pub points_charged: i64,
}

#[derive(Debug, Serialize)]
pub struct CacheCleared {
    pub cleared_items: usize,
    pub keys: Vec<DbId>,
}

/// Chapters of a comic, served from the access cache when fresh.
async fn comic_chapters(state: &AppState, comic_id: DbId) -> AppResult<Vec<ChapterRef>> {
    if let Some(chapters) = state.access_cache.lock().await.get(&comic_id) {
        return Ok(chapters);
    }

    let chapters: Vec<ChapterRef> = ChapterRepo::list_by_comic(&state.pool, comic_id)
        .await?
        .iter()
        .map(Chapter::to_ref)
        .collect();
    state
        .access_cache
        .lock()
        .await
        .insert(comic_id, chapters.clone());
    Ok(chapters)
}

/// GET /api/v1/users/{id}/comics/{comic_id}/chapters
///
/// Every chapter of the comic with `is_locked` for this reader.
pub async fn user_comic_chapters(
    State(state): State<AppState>,
    Path((user_id, comic_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<UserComicChapters>>> {
    require_user(&state.pool, user_id).await?;
    let comic = require_comic(&state.pool, comic_id).await?;

    let chapters = comic_chapters(&state, comic_id).await?;
    let read_ids = HistoryRepo::chapter_ids_for_user(&state.pool, user_id).await?;

    Ok(Json(DataResponse {
        data: UserComicChapters {
            user_id,
            comic_id,
            comic_name: comic.comic_name,
            chapters: access::chapter_locks(&chapters, &read_ids),
        },
    }))
}

/// GET /api/v1/users/{id}/chapters/{chapter_id}/access
pub async fn chapter_access(
    State(state): State<AppState>,
    Path((user_id, chapter_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ChapterAccessResponse>>> {
    require_user(&state.pool, user_id).await?;
    let chapter = require_chapter(&state.pool, chapter_id).await?;

    let chapters = comic_chapters(&state, chapter.comic_id).await?;
    let read_ids = HistoryRepo::chapter_ids_for_user(&state.pool, user_id).await?;
    let decision = access::single_chapter_access(&chapter.to_ref(), &chapters, &read_ids);

    Ok(Json(DataResponse {
        data: ChapterAccessResponse {
            user_id,
            chapter_id,
            decision,
        },
    }))
}

/// POST /api/v1/users/{id}/chapters/{chapter_id}/unlock
///
/// Charges the unlock cost and records the chapter in the reader's history
/// in one transaction. A chapter the reader can already open is returned
/// without charging. Fails with 402 when the balance is too low.
///
/// The access check runs after the user row is locked, so concurrent unlocks
/// of the same chapter charge once.
pub async fn unlock(
    State(state): State<AppState>,
    Path((user_id, chapter_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<UnlockResult>>> {
    let chapter = require_chapter(&state.pool, chapter_id).await?;
    let target = chapter.to_ref();
    let redirect_url = access::reader_url(&state.config.reader_page_url, &target);
    let chapters = comic_chapters(&state, chapter.comic_id).await?;

    let mut tx = state.pool.begin().await?;
    let balance = UserRepo::lock_points(&mut *tx, user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;
    let read_ids = HistoryRepo::chapter_ids_for_user_in(&mut *tx, user_id).await?;
    if access::single_chapter_access(&target, &chapters, &read_ids).is_accessible {
        tx.commit().await?;
        return Ok(Json(DataResponse {
            data: UnlockResult {
                chapter_id,
                redirect_url,
                points_remaining: balance,
                points_charged: 0,
            },
        }));
    }

    let cost = state.config.chapter_unlock_cost;
    let points_remaining =
        UserRepo::adjust_points(&mut *tx, user_id, PointsChange::Deduct(cost)).await?;
    HistoryRepo::record(&mut *tx, user_id, chapter_id).await?;
    tx.commit().await?;

    tracing::info!(user_id, chapter_id, cost, points_remaining, "Chapter unlocked");

    let comic = require_comic(&state.pool, chapter.comic_id).await?;
    state.event_bus.publish(
        PlatformEvent::new(event_types::CHAPTER_UNLOCKED)
            .with_source("chapter", chapter_id)
            .with_actor(user_id)
            .with_payload(serde_json::json!({
                "comic_name": comic.comic_name,
                "chapter_number": chapter.chapter_number,
                "cost": cost,
            })),
    );

    Ok(Json(DataResponse {
        data: UnlockResult {
            chapter_id,
            redirect_url,
            points_remaining,
            points_charged: cost,
        },
    }))
}

/// POST /api/v1/access-cache/clear
pub async fn clear_cache(State(state): State<AppState>) -> Json<DataResponse<CacheCleared>> {
    let keys = state.access_cache.lock().await.clear();
    tracing::info!(cleared = keys.len(), "Access cache cleared");
    Json(DataResponse {
        data: CacheCleared {
            cleared_items: keys.len(),
            keys,
        },
    })
}
