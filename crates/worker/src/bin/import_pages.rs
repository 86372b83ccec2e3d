//! Load chapter page images from a folder tree into the database.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use inkwell_db::repositories::{ChapterRepo, ComicRepo};
use inkwell_worker::import::{import_chapter, scan_library, ScanFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Upload chapter pages from `<root>/<comic name>/<chapter folder>/` images.
#[derive(Parser, Debug)]
#[clap(rename_all = "kebab-case")]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct Args {
    /// Directory holding one folder per comic.
    #[clap(default_value = "Chapters")]
    root: PathBuf,
    /// Only import the comic with this exact name.
    #[clap(long)]
    comic: Option<String>,
    /// Only import this chapter number.
    #[clap(long)]
    chapter: Option<i32>,
    /// List what would be uploaded without touching the database.
    #[clap(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkwell_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let filter = ScanFilter {
        comic: args.comic.clone(),
        chapter: args.chapter,
    };
    let library = scan_library(&args.root, &filter)
        .with_context(|| format!("failed to scan {}", args.root.display()))?;

    if args.dry_run {
        for comic in &library {
            for chapter in &comic.chapters {
                tracing::info!(
                    comic = %comic.comic_name,
                    chapter = chapter.chapter_number,
                    pages = chapter.images.len(),
                    "Would upload"
                );
            }
        }
        return Ok(());
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = inkwell_db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;

    let (mut chapters_done, mut pages_done, mut skipped) = (0usize, 0usize, 0usize);

    for comic_folder in &library {
        let Some(comic) = ComicRepo::find_by_name(&pool, &comic_folder.comic_name).await? else {
            tracing::warn!(comic = %comic_folder.comic_name, "Comic not found, skipping folder");
            skipped += comic_folder.chapters.len();
            continue;
        };

        for folder in &comic_folder.chapters {
            let Some(chapter) =
                ChapterRepo::find_by_number(&pool, comic.id, folder.chapter_number).await?
            else {
                tracing::warn!(
                    comic = %comic.comic_name,
                    chapter = folder.chapter_number,
                    "Chapter not found, skipping folder"
                );
                skipped += 1;
                continue;
            };

            match import_chapter(&pool, chapter.id, folder).await {
                Ok(pages) => {
                    tracing::info!(
                        comic = %comic.comic_name,
                        chapter = folder.chapter_number,
                        pages,
                        "Chapter pages uploaded"
                    );
                    chapters_done += 1;
                    pages_done += pages;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        comic = %comic.comic_name,
                        chapter = folder.chapter_number,
                        "Chapter upload rolled back"
                    );
                    skipped += 1;
                }
            }
        }
    }

    tracing::info!(chapters = chapters_done, pages = pages_done, skipped, "Import finished");
    Ok(())
}
