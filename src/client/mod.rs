//! Content client - fetches directory listings and raw files from the
//! remote content host

pub mod directus;

use serde::Deserialize;
use thiserror::Error;

use crate::config::SourceConfig;

/// Errors from the remote content host.
///
/// Parse-class failures never show up here: they are recovered locally
/// during normalization (sentinel posts, skipped category files).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("authentication rejected (HTTP {status}) for {url}")]
    Auth { url: String, status: u16 },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// One entry of a remote directory listing
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub name: String,
    /// Raw-content URL; absent for subdirectories
    pub download_url: Option<String>,
    /// Content hash of the file, used as the post id
    pub sha: String,
}

impl FileEntry {
    /// Whether this entry is a fetchable Markdown content file
    pub fn is_markdown(&self) -> bool {
        self.name.ends_with(".md") && self.download_url.is_some()
    }
}

/// A remote store of content files.
///
/// Implemented by [`GithubClient`]; the loader is generic over it so tests
/// can run against an in-memory fixture.
pub trait RemoteStore {
    /// List a directory. Fails on any non-success status.
    fn list_dir(
        &self,
        dir: &str,
    ) -> impl std::future::Future<Output = Result<Vec<FileEntry>, FetchError>>;

    /// List an optional directory. A missing directory is `Ok(None)`, not an
    /// error: callers use this to fall back to built-in defaults.
    fn list_dir_optional(
        &self,
        dir: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<FileEntry>>, FetchError>>;

    /// Fetch the raw text of one file.
    fn fetch_text(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<String, FetchError>>;
}

/// Client for a GitHub-style contents API
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    config: SourceConfig,
}

impl GithubClient {
    /// Create a client for the given source
    pub fn new(config: SourceConfig) -> Self {
        // The contents API rejects requests without a User-Agent
        let http = reqwest::Client::builder()
            .user_agent(concat!("pluma-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { http, config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Resolve a media path from front matter against the raw media base
    pub fn media_url(&self, path: &str) -> Option<String> {
        resolve_media_url(&self.config.raw_base, path)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl RemoteStore for GithubClient {
    async fn list_dir(&self, dir: &str) -> Result<Vec<FileEntry>, FetchError> {
        let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), dir);
        let entries = self.get(&url).await?.json::<Vec<FileEntry>>().await?;
        tracing::debug!("Listed {} entries in {}", entries.len(), dir);
        Ok(entries)
    }

    async fn list_dir_optional(&self, dir: &str) -> Result<Option<Vec<FileEntry>>, FetchError> {
        match self.list_dir(dir).await {
            Ok(entries) => Ok(Some(entries)),
            Err(FetchError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        Ok(self.get(url).await?.text().await?)
    }
}

/// Resolve a relative media path to an absolute URL under `raw_base`.
///
/// Rules, in order: empty input resolves to nothing; absolute URLs pass
/// through unchanged; a leading slash is stripped; paths outside the two
/// known media prefixes (`static/`, `img/`) are placed under `static/`;
/// `img/` paths are nested inside `static/`.
///
/// # Examples
/// ```ignore
/// resolve_media_url(base, "cat.png")      // -> "<base>/static/cat.png"
/// resolve_media_url(base, "/img/cat.png") // -> "<base>/static/img/cat.png"
/// ```
pub fn resolve_media_url(raw_base: &str, path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }

    let mut path = path.strip_prefix('/').unwrap_or(path).to_string();
    if !path.starts_with("static/") && !path.starts_with("img/") {
        path = format!("static/{}", path);
    }
    if path.starts_with("img/") {
        path = format!("static/{}", path);
    }

    Some(format!("{}/{}", raw_base.trim_end_matches('/'), path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://raw.githubusercontent.com/alice/notes/main";

    #[test]
    fn test_media_url_empty() {
        assert_eq!(resolve_media_url(BASE, ""), None);
    }

    #[test]
    fn test_media_url_absolute_unchanged() {
        assert_eq!(
            resolve_media_url(BASE, "http://x/y.png"),
            Some("http://x/y.png".to_string())
        );
        assert_eq!(
            resolve_media_url(BASE, "https://cdn.example.com/a.jpg"),
            Some("https://cdn.example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn test_media_url_bare_filename() {
        assert_eq!(
            resolve_media_url(BASE, "cat.png"),
            Some(format!("{}/static/cat.png", BASE))
        );
    }

    #[test]
    fn test_media_url_img_nested_under_static() {
        assert_eq!(
            resolve_media_url(BASE, "/img/cat.png"),
            Some(format!("{}/static/img/cat.png", BASE))
        );
        assert_eq!(
            resolve_media_url(BASE, "img/cat.png"),
            Some(format!("{}/static/img/cat.png", BASE))
        );
    }

    #[test]
    fn test_media_url_static_kept() {
        assert_eq!(
            resolve_media_url(BASE, "static/banner.jpg"),
            Some(format!("{}/static/banner.jpg", BASE))
        );
    }

    #[test]
    fn test_file_entry_from_listing_json() {
        let json = r#"[
            {"name": "2024-01-15-hello.md", "path": "_posts/2024-01-15-hello.md",
             "sha": "abc123", "size": 42, "type": "file",
             "download_url": "https://raw.example.com/2024-01-15-hello.md"},
            {"name": "drafts", "sha": "def456", "type": "dir", "download_url": null}
        ]"#;
        let entries: Vec<FileEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_markdown());
        assert!(!entries[1].is_markdown());
        assert_eq!(entries[0].sha, "abc123");
    }
}
