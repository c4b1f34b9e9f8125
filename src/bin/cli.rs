//! itemwiki CLI
//!
//! Local entry point over the wiki client and the export pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use itemwiki::{
    error::Result,
    models::{ArticlesOptions, Config},
    pipeline,
    services::WikiClient,
};
use serde::Serialize;

/// itemwiki - Game item extraction from wikis
#[derive(Parser, Debug)]
#[command(
    name = "itemwiki",
    version,
    about = "Extract game item records from MediaWiki-style wikis"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "itemwiki.toml")]
    config: PathBuf,

    /// Override the wiki base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the cache directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the item record of one page
    Item {
        /// Page title or slug
        page: String,
    },

    /// List the members of a category
    Members {
        /// Category name, without the `Category:` prefix
        category: String,
    },

    /// List category articles through the Articles API
    Articles {
        category: String,

        /// Maximum number of articles to fetch
        #[arg(long, default_value_t = 10_000)]
        limit: u32,
    },

    /// Export every member of a category as index records
    Export {
        category: String,

        /// Output file
        #[arg(short, long, default_value = "items.json")]
        output: PathBuf,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(base_url) = cli.base_url {
        config.wiki.base_url = base_url;
    }
    if let Some(cache_dir) = cli.cache_dir {
        config.cache.dir = cache_dir;
    }

    if let Command::Validate = cli.command {
        log::info!("Validating configuration...");
        if let Err(e) = config.validate() {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
        log::info!("✓ Config OK ({})", config.wiki.base_url);
        return Ok(());
    }

    config.validate()?;
    log::debug!(
        "Using {} with cache at {}",
        config.wiki.base_url,
        config.cache.dir.display()
    );
    let client = WikiClient::from_config(&config)?;

    match cli.command {
        Command::Item { page } => {
            let item = client.item(&page).await?;
            print_json(&item)?;
        }

        Command::Members { category } => {
            let members = client.category_members(&category).await?;
            log::info!("{} members in Category:{}", members.len(), category);
            print_json(&members)?;
        }

        Command::Articles { category, limit } => {
            let options = ArticlesOptions {
                limit,
                ..ArticlesOptions::default()
            };
            let articles = client.articles(&category, &options).await?;
            print_json(&articles)?;
        }

        Command::Export { category, output } => {
            let outcome = pipeline::run_export(&client, &config.batch, &category).await?;
            pipeline::write_records(&output, &outcome.records).await?;
            print_json(&outcome.stats)?;
        }

        Command::Validate => {}
    }

    Ok(())
}
