//! Chapter access rules.
//!
//! Readers progress through a comic in order. Chapter 1 is always open; any
//! other chapter opens once it is in the reader's history or once the chapter
//! immediately before it (by number) has been read.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::DbId;

/// The minimal chapter shape the access rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRef {
    pub id: DbId,
    pub comic_id: DbId,
    pub chapter_number: i32,
    pub title: String,
}

/// A chapter annotated with its lock state for one reader.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterAccess {
    pub chapter_id: DbId,
    pub chapter_number: i32,
    pub title: String,
    pub is_locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    FirstChapter,
    InHistory,
    PreviousChapterRead,
    NotInSequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub is_accessible: bool,
    pub reason: AccessReason,
}

/// Annotate every chapter of a comic with `is_locked`, sorted by number.
pub fn chapter_locks(chapters: &[ChapterRef], read_ids: &HashSet<DbId>) -> Vec<ChapterAccess> {
    let mut sorted: Vec<&ChapterRef> = chapters.iter().collect();
    sorted.sort_by_key(|c| (c.chapter_number, c.id));

    sorted
        .iter()
        .enumerate()
        .map(|(i, chapter)| {
            let unlocked = chapter.chapter_number == 1
                || read_ids.contains(&chapter.id)
                || (i > 0 && read_ids.contains(&sorted[i - 1].id));
            ChapterAccess {
                chapter_id: chapter.id,
                chapter_number: chapter.chapter_number,
                title: chapter.title.clone(),
                is_locked: !unlocked,
            }
        })
        .collect()
}

/// Decide whether one chapter is readable.
///
/// `all_chapters` are the chapters of the target's comic; the target itself
/// may or may not be among them.
pub fn single_chapter_access(
    target: &ChapterRef,
    all_chapters: &[ChapterRef],
    read_ids: &HashSet<DbId>,
) -> AccessDecision {
    let decision = |is_accessible, reason| AccessDecision {
        is_accessible,
        reason,
    };

    if target.chapter_number == 1 {
        return decision(true, AccessReason::FirstChapter);
    }
    if read_ids.contains(&target.id) {
        return decision(true, AccessReason::InHistory);
    }

    let previous = all_chapters
        .iter()
        .filter(|c| c.comic_id == target.comic_id && c.chapter_number < target.chapter_number)
        .max_by_key(|c| c.chapter_number);

    match previous {
        Some(prev) if read_ids.contains(&prev.id) => {
            decision(true, AccessReason::PreviousChapterRead)
        }
        _ => decision(false, AccessReason::NotInSequence),
    }
}

/// Nearest lower and higher chapters of the same comic.
pub fn navigation<'a>(
    current: &ChapterRef,
    siblings: &'a [ChapterRef],
) -> (Option<&'a ChapterRef>, Option<&'a ChapterRef>) {
    let same_comic = || {
        siblings
            .iter()
            .filter(|c| c.comic_id == current.comic_id && c.id != current.id)
    };
    let prev = same_comic()
        .filter(|c| c.chapter_number < current.chapter_number)
        .max_by_key(|c| c.chapter_number);
    let next = same_comic()
        .filter(|c| c.chapter_number > current.chapter_number)
        .min_by_key(|c| c.chapter_number);
    (prev, next)
}

/// Build the reader page link handed back after a successful unlock.
pub fn reader_url(base: &str, chapter: &ChapterRef) -> String {
    format!(
        "{base}?chapter_id={}&chapter_number={}&title={}&comic_id={}&purchased=true",
        chapter.id,
        chapter.chapter_number,
        urlencoding::encode(&chapter.title),
        chapter.comic_id,
    )
}
