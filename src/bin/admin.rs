//! CLI administration tool for LinkHaven.
//!
//! Provides commands for support tasks (premium overrides, page lookups),
//! platform statistics and database maintenance without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Grant premium by username or user id
//! cargo run --bin admin -- premium grant alice
//!
//! # Revoke premium without a prompt
//! cargo run --bin admin -- premium revoke 6f1c...e2 -y
//!
//! # Inspect a page and its links
//! cargo run --bin admin -- page show alice
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use linkhaven::config::Config;
use linkhaven::domain::entities::{Page, Profile};
use linkhaven::domain::repositories::{LinkRepository, PageRepository, ProfileRepository};
use linkhaven::infrastructure::persistence::{
    PgLinkRepository, PgPageRepository, PgProfileRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing LinkHaven.
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
    /// Override a user's premium flag
    Premium {
        #[command(subcommand)]
        action: PremiumAction,
    },

    /// Inspect pages
    Page {
        #[command(subcommand)]
        action: PageAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum PremiumAction {
    /// Mark a user as premium
    Grant {
        /// User id (UUID) or page username
        user: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Remove a user's premium flag
    Revoke {
        /// User id (UUID) or page username
        user: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PageAction {
    /// Show a page with its owner and links
    Show {
        /// Page username
        username: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

struct Repos {
    profiles: PgProfileRepository,
    pages: PgPageRepository,
    links: PgLinkRepository,
}

impl Repos {
    fn new(pool: &PgPool) -> Self {
        let pool = Arc::new(pool.clone());
        Self {
            profiles: PgProfileRepository::new(pool.clone()),
            pages: PgPageRepository::new(pool.clone()),
            links: PgLinkRepository::new(pool),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Premium { action } => handle_premium_action(action, &pool).await?,
        Commands::Page { action } => handle_page_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Finds the profile behind a UUID or a page username.
async fn resolve_profile(repos: &Repos, user: &str) -> Result<(Profile, Option<Page>)> {
    let (user_id, page) = match Uuid::parse_str(user) {
        Ok(id) => (id, repos.pages.find_by_user(id).await?),
        Err(_) => {
            let page = repos
                .pages
                .find_by_username(&user.trim().to_ascii_lowercase())
                .await?
                .with_context(|| format!("No page with username '{}'", user))?;
            (page.user_id, Some(page))
        }
    };

    let profile = repos
        .profiles
        .find_by_id(user_id)
        .await?
        .with_context(|| format!("No profile for user {}", user_id))?;

    Ok((profile, page))
}

async fn handle_premium_action(action: PremiumAction, pool: &PgPool) -> Result<()> {
    let (user, grant, skip_confirm) = match action {
        PremiumAction::Grant { user, yes } => (user, true, yes),
        PremiumAction::Revoke { user, yes } => (user, false, yes),
    };

    let repos = Repos::new(pool);
    let (profile, page) = resolve_profile(&repos, &user).await?;

    let verb = if grant { "Grant" } else { "Revoke" };
    println!("{}", format!("⭐ {} premium", verb).bright_blue().bold());
    println!();
    println!("  User:     {}", profile.id.to_string().bright_black());
    println!(
        "  Email:    {}",
        profile.email.as_deref().unwrap_or("-").cyan()
    );
    if let Some(page) = &page {
        println!("  Page:     {}", format!("/{}", page.username).cyan());
    }
    println!(
        "  Premium:  {}",
        if profile.is_premium {
            "yes".green()
        } else {
            "no".bright_black()
        }
    );
    println!();

    if profile.is_premium == grant {
        println!("{}", "⚠️  Nothing to change".yellow());
        return Ok(());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("{} premium for this user?", verb))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repos
        .profiles
        .set_premium(profile.id, grant)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update premium flag: {}", e))?;

    println!("{}", "✅ Premium flag updated".green().bold());
    println!();

    Ok(())
}

async fn handle_page_action(action: PageAction, pool: &PgPool) -> Result<()> {
    let PageAction::Show { username } = action;

    let repos = Repos::new(pool);
    let page = repos
        .pages
        .find_by_username(&username.trim().to_ascii_lowercase())
        .await?
        .with_context(|| format!("No page with username '{}'", username))?;
    let owner = repos.profiles.find_by_id(page.user_id).await?;
    let links = repos.links.list_by_page(page.id).await?;

    println!("{}", format!("📄 /{}", page.username).bright_blue().bold());
    println!();
    println!("  Page id:   {}", page.id.to_string().bright_black());
    println!("  Template:  {}", page.template.as_str().cyan());
    println!("  Bio:       {}", page.bio.as_deref().unwrap_or("-"));
    match &owner {
        Some(owner) => {
            println!("  Owner:     {}", owner.id.to_string().bright_black());
            println!("  Email:     {}", owner.email.as_deref().unwrap_or("-").cyan());
            println!(
                "  Premium:   {}",
                if owner.is_premium {
                    "yes".green()
                } else {
                    "no".bright_black()
                }
            );
        }
        None => println!("  Owner:     {}", "missing profile".red()),
    }
    println!();

    if links.is_empty() {
        println!("{}", "  No links".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<8} {:<8} {}",
        "#".bright_white().bold(),
        "Title".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Status".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for link in &links {
        let status = if link.is_active {
            "ACTIVE".green()
        } else {
            "HIDDEN".bright_black()
        };

        println!(
            "  {:<4} {:<30} {:<8} {:<8} {}",
            link.sort_order.to_string().bright_black(),
            link.title.cyan(),
            link.click_count,
            status,
            link.url.bright_black()
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays platform statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (profiles, premium): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_premium) FROM user_profiles",
    )
    .fetch_one(pool)
    .await?;

    let pages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages")
        .fetch_one(pool)
        .await?;

    let (links, clicks): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(click_count), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    let views: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(views), 0)::BIGINT FROM analytics")
        .fetch_one(pool)
        .await?;

    println!("  Profiles:   {}", profiles.to_string().bright_green().bold());
    println!("  Premium:    {}", premium.to_string().bright_green().bold());
    println!("  Pages:      {}", pages.to_string().bright_green().bold());
    println!("  Links:      {}", links.to_string().bright_green().bold());
    println!("  Views:      {}", views.to_string().bright_green().bold());
    println!("  Clicks:     {}", clicks.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database maintenance commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
