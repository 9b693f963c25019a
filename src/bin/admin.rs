//! CLI administration tool for snaplink.
//!
//! Shortens and resolves links, shows statistics and performs database
//! operations against the same PostgreSQL store the server uses, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL with a generated code
//! cargo run --bin admin -- shorten example.com/page
//!
//! # Shorten a URL with a custom code
//! cargo run --bin admin -- shorten https://example.com --code promo
//!
//! # Look up where a code points
//! cargo run --bin admin -- resolve promo
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` parts): PostgreSQL connection string
//! - `CODE_LENGTH`, `CODE_MAX_ATTEMPTS`: same code settings as the server

use snaplink::application::services::UrlService;
use snaplink::config::{self, Config, mask_connection_string};
use snaplink::domain::error::UrlStoreError;
use snaplink::infrastructure::persistence::{MIGRATOR, PgUrlRepository};
use snaplink::server::build_url_service;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// Long URL to shorten (scheme optional)
        url: String,

        /// Custom short code instead of a generated one
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show the long URL behind a short code
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending schema migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = match &config.database_url {
        Some(url) => url.clone(),
        None => Config::load_database_url()?,
    };
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    let service = build_url_service(
        &config,
        Arc::new(PgUrlRepository::new(Arc::new(pool.clone()))),
    );

    match cli.command {
        Commands::Shorten { url, code } => handle_shorten(&service, &url, code.as_deref()).await?,
        Commands::Resolve { code } => handle_resolve(&service, &code).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Saves a mapping and prints the resulting code.
async fn handle_shorten(service: &UrlService, url: &str, code: Option<&str>) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    match service.save_url(url, code).await {
        Ok(mapping) => {
            println!("  Code:     {}", mapping.short_code.bright_yellow().bold());
            println!("  Long URL: {}", mapping.long_url.cyan());
            println!();
            println!("{}", "✅ Short link created".green().bold());
        }
        Err(UrlStoreError::GenerationExhausted { attempts }) => {
            println!(
                "{} {}",
                "❌ No free code found after".red(),
                format!(
                    "{} attempts of length {}",
                    attempts,
                    service.code_length()
                )
                .yellow()
            );
        }
        Err(UrlStoreError::CodeAlreadyExists(code)) => {
            println!("{} {}", "❌ Code already taken:".red(), code.yellow());
        }
        Err(e) if e.is_client_error() => {
            println!("{} {}", "❌".red(), e.to_string().red());
        }
        Err(e) => return Err(e).context("Failed to save URL"),
    }
    println!();

    Ok(())
}

/// Prints the long URL a code points to.
async fn handle_resolve(service: &UrlService, code: &str) -> Result<()> {
    match service.get_mapping(code).await {
        Ok(mapping) => {
            println!("  Code:     {}", mapping.short_code.bright_yellow().bold());
            println!("  Long URL: {}", mapping.long_url.cyan());
            println!(
                "  Created:  {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .bright_black()
            );
        }
        Err(UrlStoreError::CodeNotFound(code)) => {
            println!("{} {}", "⚠️  No mapping for code".yellow(), code.bright_white());
        }
        Err(e) => return Err(e).context("Failed to resolve code"),
    }
    println!();

    Ok(())
}

/// Displays the number of stored mappings.
async fn handle_stats(service: &UrlService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = service.count().await?;

    println!(
        "  Short links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Code length: {} ({} attempts)",
        service.code_length().to_string().bright_white(),
        service.max_attempts()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            MIGRATOR
                .run(pool)
                .await
                .context("Failed to run database migrations")?;

            println!("{}", "✅ Schema up to date".green().bold());
        }
    }

    Ok(())
}
