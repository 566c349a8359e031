//! Post model and normalization

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::frontmatter;
use super::markdown::MarkdownRenderer;

/// Category slug applied when front matter names none
pub const DEFAULT_CATEGORY: &str = "programming";

/// Category slug carried by sentinel error posts
const ERROR_CATEGORY: &str = "personal";

/// Maximum derived excerpt length, in characters
const EXCERPT_LEN: usize = 150;

lazy_static! {
    static ref DATE_PREFIX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap();
}

/// A normalized blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Content hash of the source file (filename when unavailable)
    pub id: String,

    /// Post title
    pub title: String,

    /// Rendered HTML content
    pub body: String,

    /// Short plain-text summary, at most 150 characters plus ellipsis
    pub excerpt: String,

    /// Category slug; resolved against the category map at display time
    pub category: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Filename without extension; routing key, unique per load cycle
    pub slug: String,

    /// Relative path or absolute URL of the cover image
    pub featured_image: Option<String>,
}

impl Post {
    /// Normalize one raw file into a post.
    ///
    /// Total: every missing or unparseable field falls back to a derived
    /// value, so a batch load never fails on file content.
    pub fn normalize(renderer: &MarkdownRenderer, filename: &str, id: &str, raw: &str) -> Self {
        let (meta, body_md) = frontmatter::parse(raw);

        let title = meta
            .get("title")
            .cloned()
            .unwrap_or_else(|| title_from_filename(filename));
        let category = meta
            .get("category")
            .cloned()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let date = meta
            .get("date")
            .and_then(|d| parse_date(d))
            .unwrap_or_else(Utc::now);
        let excerpt = meta
            .get("excerpt")
            .filter(|e| !e.is_empty())
            .cloned()
            .unwrap_or_else(|| derive_excerpt(&body_md));
        let featured_image = meta
            .get("featured_image")
            .filter(|p| !p.is_empty())
            .cloned();

        Self {
            id: id.to_string(),
            title,
            body: renderer.render(&body_md),
            excerpt,
            category,
            date,
            slug: slug_from_filename(filename),
            featured_image,
        }
    }

    /// Sentinel post substituted when a file cannot be fetched, keeping the
    /// batch load total
    pub fn error_post(filename: &str) -> Self {
        Self {
            id: filename.to_string(),
            title: format!("Error: {}", filename),
            body: "This post could not be loaded.".to_string(),
            excerpt: "Failed to load the post content.".to_string(),
            category: ERROR_CATEGORY.to_string(),
            date: Utc::now(),
            slug: slug_from_filename(filename),
            featured_image: None,
        }
    }
}

/// Filename with the extension removed
fn slug_from_filename(filename: &str) -> String {
    filename.strip_suffix(".md").unwrap_or(filename).to_string()
}

/// Derive a title from a filename: drop the extension and any leading
/// `YYYY-MM-DD-` prefix, then title-case the hyphen-separated words
fn title_from_filename(filename: &str) -> String {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    let stem = DATE_PREFIX.replace(stem, "");
    stem.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// First 150 characters of the body with Markdown punctuation removed,
/// ellipsis appended when truncated
fn derive_excerpt(body: &str) -> String {
    let stripped: String = body
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '`'))
        .collect();

    let mut excerpt: String = stripped.chars().take(EXCERPT_LEN).collect();
    if stripped.chars().count() >= EXCERPT_LEN {
        excerpt.push_str("...");
    }
    excerpt
}

/// Parse a front-matter date string in the handful of formats seen in the
/// wild; `None` means the caller falls back to processing time
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}
