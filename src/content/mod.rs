//! Content module - front matter, markdown, post and category normalization

mod category;
pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use category::{Categories, Category};
pub use markdown::MarkdownRenderer;
pub use post::{Post, DEFAULT_CATEGORY};
