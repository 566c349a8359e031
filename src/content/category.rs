//! Category model and the built-in default set

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::frontmatter::Metadata;

/// A post category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    /// Glyph shown next to the name
    pub icon: String,
    /// Hex color, `#rrggbb`
    pub color: String,
}

impl Category {
    fn new(name: &str, slug: &str, icon: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }

    /// The record consumers fall back to when a post's category slug does
    /// not resolve to a known category
    pub fn fallback() -> Self {
        Self::new("General", "general", "📄", "#6b7280")
    }

    /// Build a category from parsed front matter, defaulting every missing
    /// field to the fallback values
    pub fn from_metadata(meta: &Metadata) -> Self {
        let fallback = Self::fallback();
        Self {
            name: meta.get("name").cloned().unwrap_or(fallback.name),
            slug: meta.get("slug").cloned().unwrap_or(fallback.slug),
            icon: meta.get("icon").cloned().unwrap_or(fallback.icon),
            color: meta.get("color").cloned().unwrap_or(fallback.color),
        }
    }
}

/// The loaded category map, indexed by slug in insertion order
#[derive(Debug, Clone, Default)]
pub struct Categories {
    map: IndexMap<String, Category>,
}

impl Categories {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in set used when the content host has no categories
    /// directory (or no parseable category files)
    pub fn defaults() -> Self {
        let mut categories = Self::new();
        for category in [
            Category::new("Programming", "programming", "💻", "#2563eb"),
            Category::new("Anime", "anime", "🎌", "#dc2626"),
            Category::new("Games", "games", "🎮", "#16a34a"),
            Category::new("Technology", "technology", "🚀", "#7c3aed"),
            Category::new("Personal", "personal", "📝", "#ea580c"),
        ] {
            categories.insert(category);
        }
        categories
    }

    pub fn insert(&mut self, category: Category) {
        self.map.insert(category.slug.clone(), category);
    }

    pub fn get(&self, slug: &str) -> Option<&Category> {
        self.map.get(slug)
    }

    /// Resolve a slug to a category, falling back to the General record for
    /// unknown slugs so display code never fails
    pub fn info(&self, slug: &str) -> Category {
        self.map.get(slug).cloned().unwrap_or_else(Category::fallback)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::frontmatter;

    #[test]
    fn test_default_set() {
        let categories = Categories::defaults();
        assert_eq!(categories.len(), 5);
        let slugs: Vec<_> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(
            slugs,
            ["programming", "anime", "games", "technology", "personal"]
        );
        assert_eq!(categories.get("anime").unwrap().color, "#dc2626");
    }

    #[test]
    fn test_info_falls_back_to_general() {
        let categories = Categories::defaults();
        let unknown = categories.info("tech");
        assert_eq!(unknown, Category::fallback());
        assert_eq!(unknown.name, "General");
        assert_eq!(unknown.color, "#6b7280");

        let known = categories.info("games");
        assert_eq!(known.name, "Games");
    }

    #[test]
    fn test_from_metadata_defaults_missing_fields() {
        let (meta, _) = frontmatter::parse("---\nname: Music\nslug: music\n---\n");
        let category = Category::from_metadata(&meta);
        assert_eq!(category.name, "Music");
        assert_eq!(category.slug, "music");
        assert_eq!(category.icon, "📄");
        assert_eq!(category.color, "#6b7280");
    }

    #[test]
    fn test_from_metadata_empty() {
        let (meta, _) = frontmatter::parse("no front matter at all");
        assert_eq!(Category::from_metadata(&meta), Category::fallback());
    }
}
