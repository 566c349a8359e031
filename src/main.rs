//! CLI entry point for pluma

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pluma_rs::client::directus::DirectusClient;
use pluma_rs::config::{SourceConfig, DEFAULT_BRANCH, DEFAULT_REPO};
use pluma_rs::filter::{self, FilterState, ViewMode};
use pluma_rs::view;
use pluma_rs::Blog;

#[derive(Parser)]
#[command(name = "pluma")]
#[command(version)]
#[command(about = "A blog engine for remotely-hosted Markdown content", long_about = None)]
struct Cli {
    /// Repository to read content from, as owner/name
    #[arg(long, global = true, default_value = DEFAULT_REPO)]
    repo: String,

    /// Branch used for raw media URLs
    #[arg(long, global = true, default_value = DEFAULT_BRANCH)]
    branch: String,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, filtered and sorted
    #[command(alias = "ls")]
    List {
        /// Category slug, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Case-insensitive search over title, excerpt and body
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order (newest, oldest, popular)
        #[arg(long, default_value = "newest")]
        sort: String,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Print one post by slug
    Show {
        /// Post slug (filename without extension)
        slug: String,
    },

    /// Print the category map
    Categories,

    /// Print the three trending posts
    Trending,

    /// Render the blog to static HTML files
    Render {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        out: PathBuf,

        /// Layout for the index page (grid, list, magazine)
        #[arg(long, default_value = "grid")]
        view: String,

        /// Category slug, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Search filter applied to the index page
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order (newest, oldest, popular)
        #[arg(long, default_value = "newest")]
        sort: String,
    },

    /// Query the alternate headless-CMS backend
    Cms {
        /// CMS base URL
        #[arg(long, default_value = "http://localhost:8055")]
        url: String,

        /// Static bearer token
        #[arg(long)]
        token: String,

        #[command(subcommand)]
        command: CmsCommands,
    },
}

#[derive(Subcommand)]
enum CmsCommands {
    /// List the latest posts
    Posts {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// List the categories
    Categories,

    /// Show the site-level blog record
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "pluma_rs=debug,info"
    } else {
        "pluma_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SourceConfig::for_repo(&cli.repo, &cli.branch);

    match cli.command {
        Commands::List {
            category,
            search,
            sort,
            page,
        } => {
            let blog = load_blog(config).await?;
            let state = filter_state(&category, &search, &sort, "grid")?;
            list_posts(&blog, &state, page);
        }

        Commands::Show { slug } => {
            let blog = load_blog(config).await?;
            let Some(post) = blog.find_by_slug(&slug) else {
                bail!("no post with slug '{}'", slug);
            };
            let category = blog.categories.info(&post.category);
            println!("{} {}", category.icon, post.title.bold());
            println!(
                "{}  {}",
                view::format_date(&post.date).dimmed(),
                category.name.dimmed()
            );
            println!();
            println!("{}", post.body);
        }

        Commands::Categories => {
            let blog = load_blog(config).await?;
            for category in blog.categories.iter() {
                println!(
                    "{} {:<14} {:<14} {}",
                    category.icon,
                    category.name.bold(),
                    category.slug,
                    category.color.dimmed()
                );
            }
        }

        Commands::Trending => {
            let blog = load_blog(config).await?;
            for post in filter::trending(&blog.posts) {
                println!(
                    "{}  {} ({})",
                    view::format_date(&post.date).dimmed(),
                    post.title.bold(),
                    post.slug
                );
            }
        }

        Commands::Render {
            out,
            view,
            category,
            search,
            sort,
        } => {
            let blog = load_blog(config).await?;
            let state = filter_state(&category, &search, &sort, &view)?;
            blog.render(&state, &cli.repo, &out)?;
            println!("Rendered {} posts to {:?}", blog.posts.len(), out);
        }

        Commands::Cms {
            url,
            token,
            command,
        } => {
            let client = DirectusClient::new(&url, &token);
            run_cms(&client, command).await?;
        }
    }

    Ok(())
}

/// Load the blog, turning a batch failure into one user-facing error state
async fn load_blog(config: SourceConfig) -> Result<Blog> {
    Blog::load(config)
        .await
        .context("could not load the blog; check the connection and try again")
}

fn filter_state(category: &str, search: &str, sort: &str, view: &str) -> Result<FilterState> {
    Ok(FilterState {
        category: category.parse().unwrap_or_default(),
        search_query: search.to_string(),
        sort_by: sort.parse().map_err(|e: String| anyhow!(e))?,
        view: view.parse::<ViewMode>().map_err(|e: String| anyhow!(e))?,
    })
}

fn list_posts(blog: &Blog, state: &FilterState, page: usize) {
    let filtered = filter::apply(&blog.posts, state);
    let page_posts = filter::paginate(&filtered, page, blog.config.per_page);

    if page_posts.is_empty() {
        println!("No posts found. Try different filters or search terms.");
        return;
    }

    for post in page_posts {
        let category = blog.categories.info(&post.category);
        println!(
            "{}  {} {}  {}",
            view::format_date(&post.date).dimmed(),
            category.icon,
            post.title.bold(),
            format!("({})", post.slug).dimmed()
        );
        println!("    {}", post.excerpt);
    }

    let pages = filtered.len().div_ceil(blog.config.per_page).max(1);
    println!();
    println!(
        "{}",
        format!("page {} of {} ({} posts)", page, pages, filtered.len()).dimmed()
    );
}

async fn run_cms(client: &DirectusClient, command: CmsCommands) -> Result<()> {
    match command {
        CmsCommands::Posts { limit } => {
            for post in client.posts(limit).await? {
                let category = post
                    .category
                    .and_then(|c| c.name)
                    .unwrap_or_else(|| "Uncategorized".to_string());
                println!(
                    "{}  {}  {}",
                    post.date_created.unwrap_or_default().dimmed(),
                    post.title.unwrap_or_default().bold(),
                    category.dimmed()
                );
                if let Some(excerpt) = post.excerpt {
                    println!("    {}", excerpt);
                }
                if let Some(image) = post.featured_image {
                    println!("    {}", client.asset_url(&image, 400).dimmed());
                }
            }
        }

        CmsCommands::Categories => {
            for category in client.categories().await? {
                println!("{}", category.name.unwrap_or_default());
            }
        }

        CmsCommands::Info => {
            let info = client.blog_info().await?;
            println!("{}", info.title.unwrap_or_default().bold());
            if let Some(description) = info.description {
                println!("{}", description);
            }
        }
    }
    Ok(())
}
