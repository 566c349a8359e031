//! HTML view rendering
//!
//! Pure string builders for the grid/list/magazine layouts, the full post
//! page and the sidebar widgets. Collections and filter state come in as
//! arguments; nothing here reaches for shared state or does I/O.

use chrono::{DateTime, Utc};

use crate::client::resolve_media_url;
use crate::content::{Categories, Category, Post};
use crate::filter::ViewMode;

/// Escape text for safe interpolation into HTML
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Lighten a `#rrggbb` color by a percentage, clamping each channel
pub fn lighten_color(color: &str, percent: i32) -> String {
    let num = u32::from_str_radix(color.trim_start_matches('#'), 16).unwrap_or(0);
    let amount = (2.55 * percent as f64).round() as i32;

    let channel = |shift: u32| (((num >> shift) & 0xff) as i32 + amount).clamp(0, 255) as u32;
    format!(
        "#{:06x}",
        (channel(16) << 16) | (channel(8) << 8) | channel(0)
    )
}

/// Long-form date for post metadata
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Category badge shown on every card and list item
fn category_badge(category: &Category) -> String {
    format!(
        r#"<span class="post-category" style="background: {}; color: {}">{} {}</span>"#,
        lighten_color(&category.color, 90),
        category.color,
        category.icon,
        escape(&category.name)
    )
}

/// Filter buttons for the category bar: "All" plus one button per category
pub fn category_filters(categories: &Categories) -> String {
    let mut html = String::from(
        r#"<button class="filter-btn active" data-category="all">All</button>"#,
    );
    for category in categories.iter() {
        html.push_str(&format!(
            r#"<button class="filter-btn" data-category="{}">{} {}</button>"#,
            escape(&category.slug),
            category.icon,
            escape(&category.name)
        ));
    }
    html
}

/// Render the filtered collection in the requested layout
pub fn posts_view(
    posts: &[&Post],
    view: ViewMode,
    categories: &Categories,
    raw_base: &str,
) -> String {
    if posts.is_empty() {
        return no_results();
    }
    match view {
        ViewMode::Grid => grid_view(posts, categories, raw_base),
        ViewMode::List => list_view(posts, categories),
        ViewMode::Magazine => magazine_view(posts, categories, raw_base),
    }
}

fn grid_view(posts: &[&Post], categories: &Categories, raw_base: &str) -> String {
    let cards: String = posts
        .iter()
        .map(|post| post_card(post, &categories.info(&post.category), raw_base))
        .collect();
    format!(r#"<div class="posts-grid">{}</div>"#, cards)
}

fn list_view(posts: &[&Post], categories: &Categories) -> String {
    let items: String = posts
        .iter()
        .map(|post| post_list_item(post, &categories.info(&post.category)))
        .collect();
    format!(r#"<div class="posts-list">{}</div>"#, items)
}

/// Magazine layout: one hero post, up to two secondary posts, the rest in a
/// grid under a "More posts" heading
fn magazine_view(posts: &[&Post], categories: &Categories, raw_base: &str) -> String {
    let hero = magazine_hero(posts[0], &categories.info(&posts[0].category), raw_base);
    let mut html = format!(r#"<div class="magazine-layout"><div class="magazine-hero">{}</div>"#, hero);

    let secondary = &posts[1..posts.len().min(3)];
    if !secondary.is_empty() {
        let items: String = secondary
            .iter()
            .map(|post| magazine_secondary(post, &categories.info(&post.category), raw_base))
            .collect();
        html.push_str(&format!(
            r#"<div class="magazine-secondary">{}</div>"#,
            items
        ));
    }

    if posts.len() > 3 {
        let rest = grid_view(&posts[3..], categories, raw_base);
        html.push_str(&format!(
            r#"<div class="magazine-grid"><h3 class="section-title">More posts</h3>{}</div>"#,
            rest
        ));
    }

    html.push_str("</div>");
    html
}

fn post_card(post: &Post, category: &Category, raw_base: &str) -> String {
    let image = post
        .featured_image
        .as_deref()
        .and_then(|path| resolve_media_url(raw_base, path));

    let image_div = match &image {
        Some(url) => format!(
            r#"<div class="post-image has-image" style="background-image: url('{}')"></div>"#,
            url
        ),
        None => format!(r#"<div class="post-image">{}</div>"#, category.icon),
    };

    format!(
        r#"<article class="post-card" id="post-{slug}">{image}<div class="post-content">{badge}<h3 class="post-title">{title}</h3><p class="post-excerpt">{excerpt}</p><div class="post-meta"><span>{date}</span><a class="read-more-btn" href="posts/{slug}.html">Read more →</a></div></div></article>"#,
        slug = escape(&post.slug),
        image = image_div,
        badge = category_badge(category),
        title = escape(&post.title),
        excerpt = escape(&post.excerpt),
        date = format_date(&post.date),
    )
}

fn post_list_item(post: &Post, category: &Category) -> String {
    format!(
        r#"<article class="post-list-item" id="post-{slug}"><div class="list-item-content">{badge}<h3 class="post-title">{title}</h3><p class="post-excerpt">{excerpt}</p><div class="post-meta"><span>{date}</span><a class="read-more-btn" href="posts/{slug}.html">Read more →</a></div></div></article>"#,
        slug = escape(&post.slug),
        badge = category_badge(category),
        title = escape(&post.title),
        excerpt = escape(&post.excerpt),
        date = format_date(&post.date),
    )
}

fn magazine_hero(post: &Post, category: &Category, raw_base: &str) -> String {
    let image = post
        .featured_image
        .as_deref()
        .and_then(|path| resolve_media_url(raw_base, path));

    let style = match &image {
        Some(url) => format!("background-image: url('{}')", url),
        None => format!(
            "background: linear-gradient(135deg, {}, {})",
            category.color,
            lighten_color(&category.color, 20)
        ),
    };

    format!(
        r#"<article class="magazine-hero-post" id="post-{slug}"><div class="hero-image" style="{style}"><div class="hero-overlay"><div class="hero-content">{badge}<h2 class="hero-title">{title}</h2><p class="hero-excerpt">{excerpt}</p><div class="hero-meta"><span>{date}</span><a class="hero-read-btn" href="posts/{slug}.html">Read more →</a></div></div></div></div></article>"#,
        slug = escape(&post.slug),
        style = style,
        badge = category_badge(category),
        title = escape(&post.title),
        excerpt = escape(&post.excerpt),
        date = format_date(&post.date),
    )
}

fn magazine_secondary(post: &Post, category: &Category, raw_base: &str) -> String {
    let image = post
        .featured_image
        .as_deref()
        .and_then(|path| resolve_media_url(raw_base, path));

    let image_div = match &image {
        Some(url) => format!(
            r#"<div class="secondary-image has-image" style="background-image: url('{}')"></div>"#,
            url
        ),
        None => format!(
            r#"<div class="secondary-image no-image" style="background: linear-gradient(135deg, {}, {})">{}</div>"#,
            category.color,
            lighten_color(&category.color, 20),
            category.icon
        ),
    };

    format!(
        r#"<article class="magazine-secondary-post" id="post-{slug}">{image}<div class="secondary-content">{badge}<h3 class="secondary-title">{title}</h3><p class="secondary-excerpt">{excerpt}</p><div class="post-meta"><span>{date}</span></div></div></article>"#,
        slug = escape(&post.slug),
        image = image_div,
        badge = category_badge(category),
        title = escape(&post.title),
        excerpt = escape(&post.excerpt),
        date = format_date(&post.date),
    )
}

/// Sidebar widget with the trending posts
pub fn trending_widget(posts: &[&Post]) -> String {
    let items: String = posts
        .iter()
        .map(|post| {
            format!(
                r#"<div class="trending-post"><a href="posts/{slug}.html"><strong>{title}</strong></a><small>{date}</small></div>"#,
                slug = escape(&post.slug),
                title = escape(&post.title),
                date = format_date(&post.date),
            )
        })
        .collect();
    format!(r#"<aside class="trending">{}</aside>"#, items)
}

/// Full post page content (title, category badge, cover image, body)
pub fn post_page(post: &Post, category: &Category, raw_base: &str) -> String {
    let header_image = post
        .featured_image
        .as_deref()
        .and_then(|path| resolve_media_url(raw_base, path))
        .map(|url| {
            format!(
                r#"<div class="post-hero-image"><img src="{}" alt="{}"></div>"#,
                url,
                escape(&post.title)
            )
        })
        .unwrap_or_else(|| {
            format!(
                r#"<div class="post-hero-placeholder" style="background: linear-gradient(135deg, {}, {})"><div class="placeholder-icon">{}</div></div>"#,
                category.color,
                lighten_color(&category.color, 20),
                category.icon
            )
        });

    format!(
        r#"<article class="full-post"><div class="post-header">{image}{badge}<h1>{title}</h1><time>{date}</time></div><div class="post-body">{body}</div></article>"#,
        image = header_image,
        badge = category_badge(category),
        title = escape(&post.title),
        date = format_date(&post.date),
        body = post.body,
    )
}

/// Panel shown when filtering yields zero posts (distinct from an error)
pub fn no_results() -> String {
    r#"<div class="no-results"><div class="no-results-icon">🔍</div><h3>No posts found</h3><p>Try different filters or search terms.</p><button class="reset-filters-btn">Reset filters</button></div>"#
        .to_string()
}

/// Minimal document shell around a rendered body
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}
