//! Genre lists are stored as a single comma-separated `TEXT` column.

/// Join a genre list into its stored form. Blank entries are dropped.
pub fn join(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Split the stored form back into a list. An empty column yields `[]`.
pub fn split(stored: &str) -> Vec<String> {
    stored
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_trims_and_skips_blanks() {
        let genres = vec![" action".to_string(), String::new(), "drama ".to_string()];
        assert_eq!(join(&genres), "action,drama");
    }

    #[test]
    fn split_empty_is_empty_list() {
        assert!(split("").is_empty());
        assert!(split(" , ").is_empty());
    }

    #[test]
    fn split_preserves_order() {
        assert_eq!(split("romance, comedy,isekai"), vec!["romance", "comedy", "isekai"]);
    }
}
