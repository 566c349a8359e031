//! Content loader - fetches and normalizes posts and categories from the
//! remote store

use futures::future::join_all;

use super::category::{Categories, Category};
use super::frontmatter;
use super::markdown::MarkdownRenderer;
use super::post::Post;
use crate::client::{FetchError, FileEntry, RemoteStore};
use crate::config::SourceConfig;

/// Loads content batches from a remote store
pub struct ContentLoader<'a, S> {
    store: &'a S,
    config: &'a SourceConfig,
    renderer: MarkdownRenderer,
}

impl<'a, S: RemoteStore> ContentLoader<'a, S> {
    pub fn new(store: &'a S, config: &'a SourceConfig) -> Self {
        Self {
            store,
            config,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load every post in the posts directory.
    ///
    /// The directory listing is the single batch-level failure point; after
    /// it resolves, all file fetches run concurrently and each converts its
    /// own failure into a sentinel post, so one bad file never aborts the
    /// batch. Listing order is preserved.
    pub async fn load_posts(&self) -> Result<Vec<Post>, FetchError> {
        let entries = self.store.list_dir(&self.config.posts_dir).await?;
        let files: Vec<_> = entries.into_iter().filter(|e| e.is_markdown()).collect();

        let posts = join_all(files.iter().map(|entry| self.load_post(entry))).await;
        tracing::info!("Loaded {} posts", posts.len());
        Ok(posts)
    }

    async fn load_post(&self, entry: &FileEntry) -> Post {
        // is_markdown() guarantees a download URL
        let url = entry.download_url.as_deref().unwrap_or_default();
        match self.store.fetch_text(url).await {
            Ok(raw) => Post::normalize(&self.renderer, &entry.name, &entry.sha, &raw),
            Err(e) => {
                tracing::warn!("Failed to load post {}: {}", entry.name, e);
                Post::error_post(&entry.name)
            }
        }
    }

    /// Load the category map, falling back to the built-in default set when
    /// the directory is absent or yields no categories. Infallible: a
    /// missing sidebar category set should never take the blog down.
    pub async fn load_categories(&self) -> Categories {
        let entries = match self.store.list_dir_optional(&self.config.categories_dir).await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                tracing::debug!("No categories directory found, using defaults");
                return Categories::defaults();
            }
            Err(e) => {
                tracing::warn!("Failed to list categories, using defaults: {}", e);
                return Categories::defaults();
            }
        };

        let files: Vec<_> = entries.into_iter().filter(|e| e.is_markdown()).collect();
        if files.is_empty() {
            return Categories::defaults();
        }

        let parsed = join_all(files.iter().map(|entry| self.load_category(entry))).await;

        let mut categories = Categories::new();
        for category in parsed.into_iter().flatten() {
            categories.insert(category);
        }
        if categories.is_empty() {
            return Categories::defaults();
        }
        categories
    }

    async fn load_category(&self, entry: &FileEntry) -> Option<Category> {
        let url = entry.download_url.as_deref().unwrap_or_default();
        match self.store.fetch_text(url).await {
            Ok(raw) => {
                let (meta, _) = frontmatter::parse(&raw);
                Some(Category::from_metadata(&meta))
            }
            Err(e) => {
                tracing::warn!("Failed to load category {}: {}", entry.name, e);
                None
            }
        }
    }
}
