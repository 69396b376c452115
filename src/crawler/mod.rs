//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeout classification
//! - Contact and link extraction from HTML
//! - Depth-ordered frontier and visited-set tracking
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;

pub use coordinator::{Coordinator, CrawlRequest, Crawler};
pub use extractor::{extract, Extraction};
pub use fetcher::{build_http_client, fetch_url, FetchResult};

use crate::config::Config;
use crate::report::CrawlReport;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the one-shot entry point: it builds an HTTP client from `config`
/// and crawls from the request's seed. Long-running callers should keep a
/// [`Crawler`] instead so the client's connection pool is reused.
///
/// # Arguments
///
/// * `config` - The harvester configuration
/// * `request` - Seed URL and depth limit
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Deduplicated identifiers found during the crawl
/// * `Err(HarvestError)` - The seed page could not be fetched
///
/// # Example
///
/// ```no_run
/// use contact_harvester::{crawl, Config, CrawlRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = CrawlRequest::new("https://example.com/", 1)?;
/// let report = crawl(&Config::default(), request).await?;
/// println!("{} e-mail addresses found", report.emails.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, request: CrawlRequest) -> Result<CrawlReport, HarvestError> {
    Crawler::new(config)?.crawl(request).await
}
