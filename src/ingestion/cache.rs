//! Fetching and caching source documents prior to extraction.

use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::fs;
use url::Url;

use crate::types::IngestError;

/// Browser-like identifier sent with download requests; some PDF hosts refuse
/// generic client strings.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Filesystem-backed cache for downloaded documents.
///
/// File names derive from the basename of the URL's path, so a file that
/// already exists suppresses the download entirely. The check is by name, not
/// content hash: a URL whose remote bytes changed without changing its path
/// will not be re-fetched.
#[derive(Clone, Debug)]
pub struct DocumentCache {
    root: PathBuf,
}

impl DocumentCache {
    /// Creates a cache rooted at the provided directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Computes the cache file path for a specific URL.
    pub fn cache_path(&self, url: &Url) -> PathBuf {
        let mut file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .map(sanitize_component)
            .unwrap_or_else(|| "document".to_string());

        if Path::new(&file_name).extension().is_none() {
            file_name.push_str(".pdf");
        }

        self.root.join(file_name)
    }
}

/// Result of fetching a document, indicating whether it came from the cache.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub url: Url,
    /// Local file holding the document's raw bytes.
    pub path: PathBuf,
    pub bytes: usize,
    pub from_cache: bool,
}

/// Fetches the document behind `url` into `cache`, returning the local path.
///
/// When the cache entry already exists no network request is performed. A
/// non-success status or any filesystem error aborts the fetch; there is no
/// retry and no partial-download cleanup.
pub async fn fetch_document(
    client: &Client,
    url: &Url,
    cache: &DocumentCache,
) -> Result<FetchOutcome, IngestError> {
    let cache_path = cache.cache_path(url);
    if cache_path.exists() {
        let metadata = fs::metadata(&cache_path).await?;
        return Ok(FetchOutcome {
            url: url.clone(),
            path: cache_path,
            bytes: metadata.len() as usize,
            from_cache: true,
        });
    }

    let response = client.get(url.clone()).send().await?.error_for_status()?;
    let body = response.bytes().await?;

    fs::create_dir_all(cache.root()).await?;
    fs::write(&cache_path, &body).await?;

    Ok(FetchOutcome {
        url: url.clone(),
        path: cache_path,
        bytes: body.len(),
        from_cache: false,
    })
}

fn sanitize_component(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn cache_path_uses_url_basename() {
        let cache = DocumentCache::new("tmp");
        let url = Url::parse("https://example.com/reports/annual-2024.pdf").unwrap();
        assert!(cache.cache_path(&url).ends_with("annual-2024.pdf"));
    }

    #[test]
    fn cache_path_sanitizes_and_defaults_extension() {
        let cache = DocumentCache::new("tmp");
        let url = Url::parse("https://example.com/files/white paper(v2)").unwrap();
        let path = cache.cache_path(&url);
        assert!(path.ends_with("white_20paper_v2_.pdf"), "got {path:?}");

        let bare = Url::parse("https://example.com/").unwrap();
        assert!(cache.cache_path(&bare).ends_with("document.pdf"));
    }

    #[tokio::test]
    async fn fetch_uses_cache_when_available() {
        let dir = tempdir().unwrap();
        let cache = DocumentCache::new(dir.path());
        let url = Url::parse("https://example.com/docs/cached.pdf").unwrap();
        let cache_path = cache.cache_path(&url);
        tokio::fs::create_dir_all(cache_path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&cache_path, b"%PDF-cached").await.unwrap();

        let Ok(client) = Client::builder().build() else {
            return;
        };

        // No server exists behind this URL, so the call only succeeds if the
        // cache suppresses the download.
        let outcome = fetch_document(&client, &url, &cache).await.unwrap();
        assert!(outcome.from_cache);
        assert_eq!(outcome.bytes, b"%PDF-cached".len());
        assert_eq!(outcome.path, cache_path);
    }
}
