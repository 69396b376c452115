//! Contact-Harvester main entry point
//!
//! Runs the HTTP service by default; `crawl` performs a single crawl and
//! prints the report.

use clap::{Parser, Subcommand};
use contact_harvester::config::{apply_env_overrides, load_config_with_hash, Config};
use contact_harvester::{crawl, CrawlRequest};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Contact-Harvester: a depth-bounded contact crawler
///
/// Crawls a website from a seed URL, collects e-mail addresses, phone numbers
/// and social-profile links, and exports them as `;`-delimited files.
#[derive(Parser, Debug)]
#[command(name = "contact-harvester")]
#[command(version)]
#[command(about = "A depth-bounded contact crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default)
    Serve,

    /// Crawl one site and print the report as JSON
    Crawl {
        /// Seed URL
        url: String,

        /// Link hops to follow from the seed
        #[arg(short, long, default_value_t = 0)]
        depth: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(&mut config)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => handle_serve(config).await,
        Command::Crawl { url, depth } => handle_crawl(&config, &url, depth).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG`, when set, takes precedence over the flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("contact_harvester=info,tower_http=info,warn"),
                1 => EnvFilter::new("contact_harvester=debug,tower_http=debug,info"),
                2 => EnvFilter::new("contact_harvester=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the HTTP service
async fn handle_serve(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting server (max depth {}, {} concurrent crawls, uploads in {})",
        config.crawler.max_depth,
        config.crawler.max_concurrent_crawls,
        config.export.uploads_dir
    );

    contact_harvester::server::serve(config).await
}

/// Runs a single crawl and prints the report
async fn handle_crawl(config: &Config, url: &str, depth: u32) -> anyhow::Result<()> {
    let request = CrawlRequest::new(url, depth)?;

    match crawl(config, request).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
