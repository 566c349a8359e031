//! pluma-rs: a blog engine for remotely-hosted Markdown content
//!
//! This crate fetches a blog's posts and categories from a remote content
//! host (a GitHub-style contents API), normalizes them into typed in-memory
//! collections, and renders filtered, sorted views of them.

pub mod client;
pub mod config;
pub mod content;
pub mod filter;
pub mod view;

use std::fs;
use std::path::Path;

use anyhow::Result;

use client::GithubClient;
use config::SourceConfig;
use content::loader::ContentLoader;
use content::{Categories, Post};
use filter::FilterState;

/// The loaded blog: configuration plus the post and category collections.
///
/// Collections are read-only snapshots from one load cycle; consumers
/// receive them by reference instead of reaching into shared state.
pub struct Blog {
    pub config: SourceConfig,
    pub categories: Categories,
    pub posts: Vec<Post>,
}

impl Blog {
    /// Fetch and normalize everything from the content host.
    ///
    /// Categories load before posts because rendering wants category
    /// metadata available; nothing else depends on the order.
    pub async fn load(config: SourceConfig) -> Result<Self> {
        let client = GithubClient::new(config.clone());
        let loader = ContentLoader::new(&client, &config);

        let categories = loader.load_categories().await;
        let posts = loader.load_posts().await?;

        Ok(Self {
            config,
            categories,
            posts,
        })
    }

    /// Look up one post by its routing slug
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Render the filtered index page and one page per post into `out_dir`
    pub fn render(&self, state: &FilterState, title: &str, out_dir: &Path) -> Result<()> {
        fs::create_dir_all(out_dir.join("posts"))?;

        let filtered = filter::apply(&self.posts, state);
        let page = filter::paginate(&filtered, 1, self.config.per_page);

        let body = format!(
            r#"<nav class="filters">{}</nav><main>{}</main>{}"#,
            view::category_filters(&self.categories),
            view::posts_view(page, state.view, &self.categories, &self.config.raw_base),
            view::trending_widget(&filter::trending(&self.posts)),
        );
        fs::write(out_dir.join("index.html"), view::document(title, &body))?;

        for post in &self.posts {
            let category = self.categories.info(&post.category);
            let html = view::document(
                &post.title,
                &view::post_page(post, &category, &self.config.raw_base),
            );
            fs::write(out_dir.join("posts").join(format!("{}.html", post.slug)), html)?;
        }

        tracing::info!(
            "Rendered {} posts to {}",
            self.posts.len(),
            out_dir.display()
        );
        Ok(())
    }
}
