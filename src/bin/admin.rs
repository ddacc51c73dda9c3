//! CLI administration tool for shorturl.
//!
//! Resolves and creates short URLs and inspects the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Look up where a code points
//! cargo run --bin admin -- resolve Ab3dE9xQz
//!
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten https://www.freecodecamp.org
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show stored mapping count
//! cargo run --bin admin -- db info
//! ```
//!
//! Uses the same environment variables as the server (see `shorturl::config`).

use shorturl::application::services::MappingService;
use shorturl::config::{self, Config, mask_connection_string};
use shorturl::error::AppError;
use shorturl::{logging, server};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use std::sync::Arc;

/// CLI tool for managing shorturl.
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
    /// Print the original URL behind a short code
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// Create (or fetch) the short code for a URL
    Shorten {
        /// URL to shorten; prompted for when omitted
        url: Option<String>,
    },

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
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    logging::init("warn", "text");

    let pool = server::connect_pool(&config).await?;
    let service = server::build_mapping_service(Arc::new(pool), &config);

    match cli.command {
        Commands::Resolve { code } => resolve(&service, &code).await?,
        Commands::Shorten { url } => shorten(&service, url).await?,
        Commands::Db { action } => handle_db_action(action, &service, &config).await?,
    }

    Ok(())
}

/// Prints the target of `code`, or a notice when it is unknown.
async fn resolve(service: &MappingService, code: &str) -> Result<()> {
    println!("{}", "🔎 Resolve Short Code".bright_blue().bold());
    println!();

    match service.resolve(code).await {
        Ok(original_url) => {
            println!("  Code: {}", code.cyan());
            println!("  URL:  {}", original_url.bright_green());
        }
        Err(AppError::NotFound { .. }) => {
            println!("  {} {}", "No URL found for".yellow(), code.cyan());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to resolve code: {}", e)),
    }

    println!();
    Ok(())
}

/// Creates or fetches the mapping for a URL, prompting when none was given.
async fn shorten(service: &MappingService, url: Option<String>) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    match service.create_or_get(&url).await {
        Ok(mapping) => {
            println!("  Original: {}", mapping.original_url.cyan());
            println!("  Code:     {}", mapping.short_code.bright_yellow().bold());
            println!(
                "  Created:  {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        Err(AppError::InvalidUrl) => {
            println!("  {} {}", "❌ Invalid URL:".red(), url);
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to shorten URL: {}", e)),
    }

    println!();
    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(
    action: DbAction,
    service: &MappingService,
    config: &Config,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔌 Database Check".bright_blue().bold());
            println!();

            match service.health_check().await {
                Ok(()) => println!("  {}", "✅ Database reachable".green().bold()),
                Err(e) => println!("  {} {}", "❌ Database unreachable:".red().bold(), e),
            }
        }
        DbAction::Info => {
            println!("{}", "📊 Database Info".bright_blue().bold());
            println!();

            let count = service
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

            println!(
                "  Database: {}",
                mask_connection_string(&config.database_url).bright_black()
            );
            println!(
                "  Mappings: {}",
                count.to_string().bright_green().bold()
            );
        }
    }

    println!();
    Ok(())
}
