//! Filter/sort engine - pure, synchronous view of the post collection
//!
//! The engine owns only the filter state; the post and category collections
//! stay with their loaders and are passed in by reference.

use std::str::FromStr;

use crate::content::Post;

/// Category criterion: everything, or one exact slug
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => Self::All,
            slug => Self::Only(slug.to_string()),
        })
    }
}

/// Sort criterion for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    /// No popularity signal exists, so this intentionally behaves like
    /// [`SortOrder::Newest`]
    Popular,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "popular" => Ok(Self::Popular),
            other => Err(format!(
                "unknown sort order '{}' (expected newest, oldest or popular)",
                other
            )),
        }
    }
}

/// Layout used when rendering the filtered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Magazine,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            "magazine" => Ok(Self::Magazine),
            other => Err(format!(
                "unknown view '{}' (expected grid, list or magazine)",
                other
            )),
        }
    }
}

/// Current filter/sort/view selection. Created with defaults at startup,
/// mutated in place by user actions, never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub search_query: String,
    pub sort_by: SortOrder,
    pub view: ViewMode,
}

impl FilterState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Apply the filter state to the post collection.
///
/// Category match is exact on the slug; search is a case-insensitive
/// substring over title, excerpt and body. The sort is stable, so posts
/// with equal dates keep their collection order.
pub fn apply<'a>(posts: &'a [Post], state: &FilterState) -> Vec<&'a Post> {
    let query = state.search_query.to_lowercase();

    let mut filtered: Vec<&Post> = posts
        .iter()
        .filter(|post| match &state.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(slug) => post.category == *slug,
        })
        .filter(|post| {
            query.is_empty()
                || post.title.to_lowercase().contains(&query)
                || post.excerpt.to_lowercase().contains(&query)
                || post.body.to_lowercase().contains(&query)
        })
        .collect();

    match state.sort_by {
        SortOrder::Oldest => filtered.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Newest | SortOrder::Popular => filtered.sort_by(|a, b| b.date.cmp(&a.date)),
    }

    filtered
}

/// The 3 most recent posts across the whole unfiltered collection,
/// newest first. Ignores any active filters.
pub fn trending(posts: &[Post]) -> Vec<&Post> {
    let mut all: Vec<&Post> = posts.iter().collect();
    all.sort_by(|a, b| b.date.cmp(&a.date));
    all.truncate(3);
    all
}

/// One page of an already filtered/sorted listing (1-based page number)
pub fn paginate<'a, T>(items: &'a [T], page: usize, per_page: usize) -> &'a [T] {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(items.len());
    if start >= items.len() {
        return &[];
    }
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn post(slug: &str, category: &str, day: u32) -> Post {
        Post {
            id: slug.to_string(),
            title: format!("Post {}", slug),
            body: format!("<p>Body of {}</p>", slug),
            excerpt: format!("Excerpt {}", slug),
            category: category.to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            slug: slug.to_string(),
            featured_image: None,
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            post("a", "programming", 3),
            post("b", "anime", 1),
            post("c", "programming", 5),
            post("d", "games", 2),
            post("e", "anime", 4),
        ]
    }

    #[test]
    fn test_all_is_identity_on_membership() {
        let posts = sample();
        let state = FilterState::default();
        let filtered = apply(&posts, &state);
        assert_eq!(filtered.len(), posts.len());
        for post in &posts {
            assert!(filtered.iter().any(|p| p.slug == post.slug));
        }
    }

    #[test]
    fn test_category_filter_exact_match() {
        let posts = sample();
        let state = FilterState {
            category: CategoryFilter::Only("anime".to_string()),
            ..Default::default()
        };
        let filtered = apply(&posts, &state);
        assert!(filtered.len() <= posts.len());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.category == "anime"));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let posts = sample();
        let state = FilterState {
            search_query: "BODY OF C".to_string(),
            ..Default::default()
        };
        let filtered = apply(&posts, &state);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].slug, "c");
    }

    #[test]
    fn test_newest_reversed_equals_oldest() {
        let posts = sample();
        let newest = apply(
            &posts,
            &FilterState {
                sort_by: SortOrder::Newest,
                ..Default::default()
            },
        );
        let oldest = apply(
            &posts,
            &FilterState {
                sort_by: SortOrder::Oldest,
                ..Default::default()
            },
        );
        let reversed: Vec<&str> = newest.iter().rev().map(|p| p.slug.as_str()).collect();
        let oldest_slugs: Vec<&str> = oldest.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(reversed, oldest_slugs);
    }

    #[test]
    fn test_popular_behaves_like_newest() {
        let posts = sample();
        let newest = apply(
            &posts,
            &FilterState {
                sort_by: SortOrder::Newest,
                ..Default::default()
            },
        );
        let popular = apply(
            &posts,
            &FilterState {
                sort_by: SortOrder::Popular,
                ..Default::default()
            },
        );
        let a: Vec<&str> = newest.iter().map(|p| p.slug.as_str()).collect();
        let b: Vec<&str> = popular.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let posts = vec![post("x", "anime", 1), post("y", "anime", 1), post("z", "anime", 1)];
        let filtered = apply(&posts, &FilterState::default());
        let slugs: Vec<&str> = filtered.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["x", "y", "z"]);
    }

    #[test]
    fn test_trending_ignores_filters() {
        let posts = sample();
        let top = trending(&posts);
        let slugs: Vec<&str> = top.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["c", "e", "a"]);
    }

    #[test]
    fn test_paginate_windows() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, 1, 10), (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(&items, 3, 10), (21..=25).collect::<Vec<_>>());
        assert!(paginate(&items, 4, 10).is_empty());
        assert!(paginate(&items, 0, 10).len() == 10);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = FilterState {
            category: CategoryFilter::Only("anime".to_string()),
            search_query: "x".to_string(),
            sort_by: SortOrder::Oldest,
            view: ViewMode::Magazine,
        };
        state.reset();
        assert_eq!(state.category, CategoryFilter::All);
        assert!(state.search_query.is_empty());
        assert_eq!(state.sort_by, SortOrder::Newest);
        assert_eq!(state.view, ViewMode::Grid);
    }
}
