//! CLI administration tool for simple-blog.
//!
//! Manages posts and the posts cache without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List posts
//! cargo run --bin admin -- posts list
//!
//! # Show a single post
//! cargo run --bin admin -- posts show 7
//!
//! # Delete a post (asks for confirmation unless --yes)
//! cargo run --bin admin -- posts delete 7
//!
//! # Cache status / drop the posts snapshot
//! cargo run --bin admin -- cache status
//! cargo run --bin admin -- cache flush
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`), `REDIS_URL` / `REDIS_ENDPOINT`,
//! `UPLOADS_BASE` / `UPLOADS_BUCKET`.

use simple_blog::application::services::{POSTS_CACHE_KEY, PostService};
use simple_blog::config::{self, Config, mask_connection_string};
use simple_blog::domain::entities::Post;
use simple_blog::infrastructure::cache::{CacheHandle, CacheState};
use simple_blog::infrastructure::persistence::PgPostRepository;
use simple_blog::server::connect_database;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing simple-blog.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage posts
    Posts {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Inspect or flush the posts cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Post management subcommands.
#[derive(Subcommand)]
enum PostAction {
    /// List all posts, newest first
    List,

    /// Show a single post
    Show {
        /// Post ID
        id: i64,
    },

    /// Delete a post and invalidate the cache
    Delete {
        /// Post ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Cache subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// PING the configured cache
    Status,

    /// Delete the posts snapshot
    Flush,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count posts
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Posts { action } => handle_post_action(action, &config).await?,
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

async fn build_service(config: &Config) -> Result<PostService> {
    let pool = connect_database(config).await?;
    let repository = Arc::new(PgPostRepository::new(Arc::new(pool)));
    let cache =
        Arc::new(CacheHandle::connect(config.redis_url.as_deref(), config.cache_options()).await);

    Ok(
        PostService::new(repository, cache, config.image_base_url.clone())
            .with_cache_ttl(config.cache_ttl_seconds),
    )
}

/// Dispatches post management commands.
async fn handle_post_action(action: PostAction, config: &Config) -> Result<()> {
    let service = build_service(config).await?;

    match action {
        PostAction::List => list_posts(&service).await?,
        PostAction::Show { id } => show_post(&service, id).await?,
        PostAction::Delete { id, yes } => delete_post(&service, id, yes).await?,
    }

    Ok(())
}

/// Lists posts as a table.
///
/// # Output Format
///
/// ```text
/// Posts
///
///   ID    Title                          Author          Created
///   ───────────────────────────────────────────────────────────────────────
///   2     Second post                    alice           2025-01-16 14:20
///   1     Hello                          bob             2025-01-15 10:30
/// ```
async fn list_posts(service: &PostService) -> Result<()> {
    println!("{}", "Posts".bright_blue().bold());
    println!();

    let posts = service
        .list_posts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list posts: {}", e))?;

    if posts.is_empty() {
        println!("{}", "  No posts found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<15} {:<20}",
        "ID".bright_white().bold(),
        "Title".bright_white().bold(),
        "Author".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for post in &posts {
        println!(
            "  {:<5} {:<30} {:<15} {}",
            post.id.to_string().bright_black(),
            truncate(&post.title, 30).cyan(),
            truncate(&post.author, 15),
            post.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", posts.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn print_post(post: &Post) {
    println!("  ID:       {}", post.id.to_string().bright_black());
    println!("  Title:    {}", post.title.cyan());
    println!("  Author:   {}", post.author);
    println!(
        "  Created:  {}",
        post.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(ref key) = post.image_key {
        println!("  Image:    {}", key);
    }
    if let Some(ref url) = post.image_url {
        println!("  URL:      {}", url.bright_cyan());
    }
    println!();
    println!("{}", post.content);
}

async fn show_post(service: &PostService, id: i64) -> Result<()> {
    let post = service
        .get_post(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_post(&post);
    println!();
    Ok(())
}

/// Deletes a post with confirmation prompt (default: No).
async fn delete_post(service: &PostService, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete Post".bright_blue().bold());
    println!();

    let post = service
        .get_post(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Post:  {}", post.title.cyan());
    println!("  ID:    {}", post.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this post?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_post(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete post: {}", e))?;

    println!("{}", "Post deleted".green().bold());
    Ok(())
}

/// Dispatches cache commands. Does not need the database.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let Some(ref redis_url) = config.redis_url else {
        println!("{}", "Cache not configured (set REDIS_URL or REDIS_ENDPOINT)".yellow());
        return Ok(());
    };

    let cache = CacheHandle::connect(Some(redis_url.as_str()), config.cache_options()).await;
    println!("  Endpoint: {}", mask_connection_string(redis_url).cyan());

    match action {
        CacheAction::Status => {
            if cache.state() == CacheState::Healthy && cache.probe().await {
                println!("  Status:   {}", "OK".green().bold());
            } else {
                println!("  Status:   {}", "UNREACHABLE".red().bold());
            }
        }
        CacheAction::Flush => {
            if cache.invalidate(POSTS_CACHE_KEY).await {
                println!("{}", format!("Flushed {}", POSTS_CACHE_KEY).green().bold());
            } else {
                anyhow::bail!("Failed to flush {}: cache unreachable", POSTS_CACHE_KEY);
            }
        }
    }

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());
            println!(
                "  Database: {}",
                mask_connection_string(&config.database_url).cyan()
            );

            let pool = connect_database(config).await?;
            let repository = PgPostRepository::new(Arc::new(pool));
            let count = repository
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))
                .context("Failed to count posts")?;

            println!("  Status:   {}", "OK".green().bold());
            println!("  Posts:    {}", count.to_string().bright_white().bold());
        }
    }

    Ok(())
}
