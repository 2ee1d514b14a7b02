//! feedpage CLI
//!
//! Builds the news page from configured feeds and exercises it locally.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use feedpage::{
    error::Result,
    models::{Config, FeedSource},
    pipeline,
    services::HttpFeedFetcher,
    storage::LocalStorage,
};

/// feedpage - Native news feed aggregator
#[derive(Parser, Debug)]
#[command(
    name = "feedpage",
    version,
    about = "Aggregates RSS feeds into a static, searchable news page"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "feedpage.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all feeds and write index.html and articles.json
    Generate {
        /// Sources file (default: paths.sources from the config)
        #[arg(long)]
        sources: Option<PathBuf>,

        /// Output directory (default: paths.output_dir from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check which feeds load and how many items they carry
    Check {
        /// Sources file (default: paths.sources from the config)
        #[arg(long)]
        sources: Option<PathBuf>,
    },

    /// Find the RSS/Atom feed URL of a website
    #[cfg(feature = "discover")]
    Discover {
        /// Website URL, e.g. https://osagenews.org
        site_url: String,
    },

    /// Filter generated articles the way the page's search box does
    Search {
        /// Search text (case-insensitive substring)
        query: String,

        /// Directory holding articles.json (default: paths.output_dir)
        #[arg(long)]
        articles: Option<PathBuf>,

        /// Re-render from records instead of toggling visibility
        #[arg(long)]
        data_driven: bool,
    },

    /// Validate configuration, sources and template
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Sources from an explicit file, or as the config resolves them.
fn load_sources(config: &Config, base_dir: &Path, path: Option<PathBuf>) -> Result<Vec<FeedSource>> {
    match path {
        Some(path) => FeedSource::load_all(path),
        None => config.load_sources(base_dir),
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Configuration from {}", cli.config.display());
    let base_dir = cli
        .config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    match cli.command {
        Command::Generate { sources, output } => {
            config.validate()?;
            let sources = load_sources(&config, &base_dir, sources)?;
            let output = output.unwrap_or_else(|| base_dir.join(&config.paths.output_dir));

            let fetcher = HttpFeedFetcher::from_config(&config.fetch)?;
            let storage = LocalStorage::new(&output);
            let summary = pipeline::run_generate(&config, &sources, &fetcher, &storage).await?;

            if summary.failed_sources > 0 {
                log::warn!(
                    "{} of {} source(s) failed; see warnings above",
                    summary.failed_sources,
                    summary.source_total
                );
            }
        }

        Command::Check { sources } => {
            let sources = load_sources(&config, &base_dir, sources)?;
            let fetcher = HttpFeedFetcher::from_config(&config.fetch)?;
            pipeline::run_check(&config, &sources, &fetcher).await?;
        }

        #[cfg(feature = "discover")]
        Command::Discover { site_url } => {
            let client = feedpage::utils::http::create_async_client(&config.fetch)?;
            if let Some(feed_url) = pipeline::run_discover(&client, &site_url).await? {
                println!("{feed_url}");
            }
        }

        Command::Search {
            query,
            articles,
            data_driven,
        } => {
            let dir = articles.unwrap_or_else(|| base_dir.join(&config.paths.output_dir));
            let storage = LocalStorage::new(dir);
            let found = pipeline::run_search(&storage, &config.render, &query, data_driven).await?;
            for record in &found {
                println!("{}", record.format("{published} | {label} | {title}\n    {link}"));
            }
        }

        Command::Validate => {
            pipeline::run_validate(&config, &base_dir)?;
            log::info!("All validations passed!");
        }
    }

    Ok(())
}
