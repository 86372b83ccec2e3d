//! Bulk page import from a folder tree.
//!
//! Expected layout:
//!
//! ```text
//! <root>/
//!   <comic name>/
//!     Chapter 1 - Arrival/
//!       01.png
//!       02.png
//!     Ch.0002/
//!       ...
//! ```
//!
//! Comic folders are matched to comics by exact name, chapter folders to
//! chapters by the number extracted from the folder name. Pages are numbered
//! 1..N in sorted file order and upserted, one transaction per chapter.

use std::path::{Path, PathBuf};

use inkwell_core::pages::{content_type_for, extract_chapter_number, is_allowed_image, sort_page_files};
use inkwell_core::types::DbId;
use inkwell_db::models::page::NewPage;
use inkwell_db::repositories::PageRepo;
use inkwell_db::DbPool;

/// A chapter folder with its page images in upload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFolder {
    pub path: PathBuf,
    pub folder_name: String,
    pub chapter_number: i32,
    pub images: Vec<String>,
}

/// A comic folder and the chapter folders found inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicFolder {
    pub comic_name: String,
    pub chapters: Vec<ChapterFolder>,
}

/// Restricts a scan to one comic and/or one chapter number.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    pub comic: Option<String>,
    pub chapter: Option<i32>,
}

fn subdirectories(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        dirs.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    dirs.sort();
    Ok(dirs)
}

fn image_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_allowed_image(&name) {
            files.push(name);
        }
    }
    sort_page_files(&mut files);
    Ok(files)
}

/// Walk `root` and collect every comic/chapter folder that holds images.
///
/// Chapter folders without a recognisable number, or without any allowed
/// image, are skipped with a warning. Comics come back sorted by name and
/// chapters by number.
pub fn scan_library(root: &Path, filter: &ScanFilter) -> std::io::Result<Vec<ComicFolder>> {
    let mut comics = Vec::new();

    for (comic_name, comic_path) in subdirectories(root)? {
        if filter.comic.as_deref().is_some_and(|c| c != comic_name) {
            continue;
        }

        let mut chapters = Vec::new();
        for (folder_name, chapter_path) in subdirectories(&comic_path)? {
            let Some(chapter_number) = extract_chapter_number(&folder_name) else {
                tracing::warn!(comic = %comic_name, folder = %folder_name, "No chapter number in folder name");
                continue;
            };
            if filter.chapter.is_some_and(|n| n != chapter_number) {
                continue;
            }
            let images = image_files(&chapter_path)?;
            if images.is_empty() {
                tracing::warn!(comic = %comic_name, folder = %folder_name, "No page images found");
                continue;
            }
            chapters.push(ChapterFolder {
                path: chapter_path,
                folder_name,
                chapter_number,
                images,
            });
        }

        if !chapters.is_empty() {
            chapters.sort_by_key(|c| c.chapter_number);
            comics.push(ComicFolder {
                comic_name,
                chapters,
            });
        }
    }

    Ok(comics)
}

/// Upsert every image of `folder` as pages of `chapter_id` in a single
/// transaction. Returns the number of pages written.
pub async fn import_chapter(
    pool: &DbPool,
    chapter_id: DbId,
    folder: &ChapterFolder,
) -> anyhow::Result<usize> {
    let mut tx = pool.begin().await?;

    for (index, filename) in folder.images.iter().enumerate() {
        let image = tokio::fs::read(folder.path.join(filename)).await?;
        let page = NewPage {
            chapter_id,
            page_number: index as i32 + 1,
            content_type: content_type_for(filename).to_string(),
            image,
        };
        PageRepo::upsert(&mut *tx, &page).await?;
        tracing::debug!(chapter_id, page_number = page.page_number, file = %filename, "Page uploaded");
    }

    tx.commit().await?;
    Ok(folder.images.len())
}
