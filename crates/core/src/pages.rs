//! Page image naming rules shared by the upload endpoint and the importer.

use std::sync::LazyLock;

use regex::Regex;

/// Extensions accepted for page images (lowercase, without the dot).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

static CHAPTER_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Chapter (\d+)").expect("valid regex"));
static CHAPTER_ABBREV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Ch\.0*(\d+)").expect("valid regex"));
static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("valid regex"));

fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Pull a chapter number out of a folder name such as `"Chapter 12 - Rain"`,
/// `"Ch.0007"` or `"012"`.
pub fn extract_chapter_number(folder: &str) -> Option<i32> {
    [&*CHAPTER_WORD, &*CHAPTER_ABBREV, &*FIRST_INTEGER]
        .iter()
        .find_map(|re| re.captures(folder))
        .and_then(|caps| caps[1].parse().ok())
}

pub fn is_allowed_image(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// MIME type for an allowed image name; `application/octet-stream` otherwise.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension(filename).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Order page files by the first integer in their name, then by name.
/// Files without a number sort last.
pub fn sort_page_files(files: &mut [String]) {
    files.sort_by(|a, b| {
        let key = |name: &str| {
            FIRST_INTEGER
                .captures(name)
                .and_then(|c| c[1].parse::<u64>().ok())
                .unwrap_or(u64::MAX)
        };
        key(a).cmp(&key(b)).then_with(|| a.cmp(b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_number_patterns() {
        assert_eq!(extract_chapter_number("Chapter 12 - Rain"), Some(12));
        assert_eq!(extract_chapter_number("Ch.0007"), Some(7));
        assert_eq!(extract_chapter_number("vol2_ep3"), Some(2));
        assert_eq!(extract_chapter_number("Prologue"), None);
    }

    #[test]
    fn chapter_word_wins_over_leading_digits() {
        assert_eq!(extract_chapter_number("2024 Chapter 5"), Some(5));
    }

    #[test]
    fn image_extensions_case_insensitive() {
        assert!(is_allowed_image("001.PNG"));
        assert!(is_allowed_image("cover.webp"));
        assert!(!is_allowed_image("notes.txt"));
        assert!(!is_allowed_image("noextension"));
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }

    #[test]
    fn pages_sort_numerically() {
        let mut files = vec![
            "10.png".to_string(),
            "2.png".to_string(),
            "cover.png".to_string(),
            "1.png".to_string(),
        ];
        sort_page_files(&mut files);
        assert_eq!(files, vec!["1.png", "2.png", "10.png", "cover.png"]);
    }
}
