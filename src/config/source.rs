//! Content source configuration
//!
//! There is no config file: the blog is driven by a handful of compile-time
//! constants (which repository to read, where raw media lives, directory
//! names, page size). The CLI can override the repository and branch.

use serde::{Deserialize, Serialize};

/// Default repository the blog reads from
pub const DEFAULT_REPO: &str = "Dan219/myBlog";

/// Default branch for raw media URLs
pub const DEFAULT_BRANCH: &str = "main";

/// Directory holding post files
pub const POSTS_DIR: &str = "_posts";

/// Directory holding category files (optional; defaults apply when absent)
pub const CATEGORIES_DIR: &str = "_categories";

/// Posts per rendered page
pub const DEFAULT_PER_PAGE: usize = 10;

/// Where the blog content comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Contents-API base, e.g. `https://api.github.com/repos/owner/repo/contents`
    pub api_base: String,

    /// Raw media base, e.g. `https://raw.githubusercontent.com/owner/repo/main`
    pub raw_base: String,

    /// Directory listed for posts
    pub posts_dir: String,

    /// Directory listed for categories
    pub categories_dir: String,

    /// Page size for listings and rendered index pages
    pub per_page: usize,
}

impl SourceConfig {
    /// Build a config for a `owner/repo` slug and branch
    pub fn for_repo(repo: &str, branch: &str) -> Self {
        Self {
            api_base: format!("https://api.github.com/repos/{}/contents", repo),
            raw_base: format!("https://raw.githubusercontent.com/{}/{}", repo, branch),
            posts_dir: POSTS_DIR.to_string(),
            categories_dir: CATEGORIES_DIR.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::for_repo(DEFAULT_REPO, DEFAULT_BRANCH)
    }
}
