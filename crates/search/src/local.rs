//! Deterministic local search fallback.
//!
//! When no live provider is in play, hits come from a seed-documents
//! directory if one exists, otherwise from synthesized placeholders. Either
//! way the output is stable for a given directory state and query, which is
//! what makes mock-mode runs reproducible.

use std::path::Path;

use scout_core::SearchHit;
use scout_core::constants::SEED_SNIPPET_CHARS;
use scout_core::truncate_chars;

/// Produce deterministic hits for a query.
///
/// Seed documents are `.txt`/`.html` files under `seed_dir`, taken in file
/// name order: title = file name, snippet = first
/// [`SEED_SNIPPET_CHARS`] characters, url = `file://` path. Unreadable
/// files are skipped with a warning. Without a usable directory, synthesized
/// placeholder hits fill in.
pub async fn local_search(seed_dir: &Path, query: &str, max_results: u32) -> Vec<SearchHit> {
    let max = max_results as usize;
    let mut hits = Vec::new();

    if let Ok(mut entries) = tokio::fs::read_dir(seed_dir).await {
        let mut names: Vec<String> = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            if let Some(name) = entry.file_name().to_str()
                && (name.ends_with(".txt") || name.ends_with(".html"))
            {
                names.push(name.to_owned());
            }
        }
        names.sort();
        for name in names.iter().take(max) {
            let file_path = seed_dir.join(name);
            match tokio::fs::read_to_string(&file_path).await {
                Ok(text) => hits.push(SearchHit {
                    title: name.clone(),
                    snippet: truncate_chars(&text, SEED_SNIPPET_CHARS).to_owned(),
                    url: format!("file://{}", file_path.display()),
                }),
                Err(e) => {
                    tracing::warn!(path = %file_path.display(), error = %e, "skipping unreadable seed document");
                },
            }
        }
    }

    if hits.is_empty() {
        for i in 1..=max {
            hits.push(SearchHit {
                title: format!("Mock result {i} for {query}"),
                snippet: "This is a mock snippet".to_owned(),
                url: format!("https://example.com/{i}"),
            });
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_reads_seed_documents_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_solar.txt"), "Solar storage basics.").unwrap();
        std::fs::write(dir.path().join("a_wind.txt"), "Wind power overview.").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored extension").unwrap();

        let hits = local_search(dir.path(), "energy", 5).await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "a_wind.txt");
        assert_eq!(hits[0].snippet, "Wind power overview.");
        assert!(hits[0].url.starts_with("file://"));
        assert_eq!(hits[1].title, "b_solar.txt");
    }

    #[tokio::test]
    async fn test_respects_max_results() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..4 {
            std::fs::write(dir.path().join(format!("doc{i}.txt")), "text").unwrap();
        }
        let hits = local_search(dir.path(), "q", 2).await;
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_snippet_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let long = "x".repeat(SEED_SNIPPET_CHARS + 100);
        std::fs::write(dir.path().join("long.txt"), &long).unwrap();

        let hits = local_search(dir.path(), "q", 1).await;
        assert_eq!(hits[0].snippet.chars().count(), SEED_SNIPPET_CHARS);
    }

    #[tokio::test]
    async fn test_missing_directory_falls_back_to_placeholders() {
        let hits = local_search(&PathBuf::from("/nonexistent/seed_docs"), "quantum", 3).await;
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title, "Mock result 1 for quantum");
        assert_eq!(hits[0].url, "https://example.com/1");
        assert_eq!(hits[2].url, "https://example.com/3");
    }

    #[tokio::test]
    async fn test_empty_directory_falls_back_to_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let hits = local_search(dir.path(), "quantum", 2).await;
        assert_eq!(hits.len(), 2);
        assert!(hits[0].title.starts_with("Mock result 1"));
    }
}
