//! blog - Simple console blog client
//!
//! List, search, print, add, modify and delete posts kept in a JSON file.

use blog::commands;
use blog::config::{BlogConfig, STORE_PATH_DEFAULT, STORE_PATH_ENV};
use clap::{CommandFactory, Parser, Subcommand};

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Application name
pub const APP_NAME: &str = "blog";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// CLI
// =============================================================================

/// Simple console blog client
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Simple console blog client")]
#[command(version)]
struct Cli {
    /// Path of the posts file
    #[arg(long, global = true, env = STORE_PATH_ENV, default_value = STORE_PATH_DEFAULT)]
    store: String,

    /// Enable verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all posts
    List {
        /// Sort by date
        #[arg(short = 's')]
        sort_by_date: bool,
    },
    /// Print post
    Print {
        /// IDs of posts to print or "all"
        #[arg(required = true)]
        postid: Vec<String>,
        /// Sort by date
        #[arg(short = 's')]
        sort_by_date: bool,
    },
    /// Search posts
    Search {
        /// Search string
        query: String,
        /// Sort results by date
        #[arg(short = 's')]
        sort_by_date: bool,
    },
    /// Add post
    Add {
        /// Post title
        title: String,
        /// Post body
        body: String,
    },
    /// Modify post
    Modify {
        /// ID of post to modify
        postid: u64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New body
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Delete post
    Delete {
        /// ID of post to delete
        postid: u64,
    },
}

// =============================================================================
// Main
// =============================================================================

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} v{}", APP_NAME, APP_VERSION);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = BlogConfig::from_raw(&cli.store);
    tracing::debug!("Store: {}", config.store_path.display());
    let store = config.open_store();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::List { sort_by_date } => commands::list_posts(&store, sort_by_date, &mut out)?,
        Commands::Print {
            postid,
            sort_by_date,
        } => commands::print_posts(&store, &postid, sort_by_date, &mut out)?,
        Commands::Search {
            query,
            sort_by_date,
        } => commands::search_posts(&store, &query, sort_by_date, &mut out)?,
        Commands::Add { title, body } => {
            commands::add_post(&store, &title, &body, &mut out)?;
        }
        Commands::Modify {
            postid,
            title,
            body,
        } => {
            commands::modify_post(&store, postid, title, body, &mut out)?;
        }
        Commands::Delete { postid } => {
            commands::delete_post(&store, postid, &mut out)?;
        }
    }

    Ok(())
}
