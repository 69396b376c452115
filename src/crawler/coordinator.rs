//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Seeding and draining the depth-ordered frontier
//! - Fetching each level concurrently, bounded per crawl
//! - Feeding extracted identifiers into the crawl's report
//! - Expanding links of pages below the depth limit
//!
//! Each [`Coordinator`] owns its own visited set (inside the frontier) and
//! [`CrawlReport`]; workers only fetch and hand results back, so neither
//! structure is ever shared between crawls or tasks. Redirects are queued
//! back into the frontier, so a page reached through several redirects is
//! still fetched once.

use crate::config::{validate, Config};
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::report::CrawlReport;
use crate::url::{normalize_url, resolve_href};
use crate::{HarvestError, UrlError};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Parameters of a single crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Seed URL as supplied by the caller; becomes the report's `url`
    pub seed: String,

    /// Parsed seed URL
    pub seed_url: Url,

    /// Link hops to follow from the seed (0 = seed page only)
    pub max_depth: u32,
}

impl CrawlRequest {
    /// Validates the seed and builds a request
    ///
    /// The seed must be an absolute http(s) URL with a host.
    pub fn new(seed: &str, max_depth: u32) -> Result<Self, UrlError> {
        let seed = seed.trim();
        normalize_url(seed)?;
        let seed_url = Url::parse(seed).map_err(|e| UrlError::Parse(e.to_string()))?;

        Ok(Self {
            seed: seed.to_string(),
            seed_url,
            max_depth,
        })
    }
}

/// Reusable crawl launcher holding the HTTP client and per-crawl limits
///
/// Cloning is cheap; every call to [`Crawler::crawl`] gets a fresh
/// [`Coordinator`].
#[derive(Debug, Clone)]
pub struct Crawler {
    client: Client,
    max_concurrent_pages: usize,
}

impl Crawler {
    /// Builds a crawler from validated configuration
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        validate(config)?;
        let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
        let client = build_http_client(&config.user_agent, timeout)?;

        Ok(Self::with_client(
            client,
            config.crawler.max_concurrent_pages_open as usize,
        ))
    }

    /// Builds a crawler around an existing client
    pub fn with_client(client: Client, max_concurrent_pages: usize) -> Self {
        Self {
            client,
            max_concurrent_pages: max_concurrent_pages.max(1),
        }
    }

    /// Runs one crawl to completion
    pub async fn crawl(&self, request: CrawlRequest) -> Result<CrawlReport, HarvestError> {
        Coordinator::new(self.client.clone(), request, self.max_concurrent_pages)
            .run()
            .await
    }
}

/// Counters gathered while a crawl runs
#[derive(Debug, Default, Clone, Copy)]
struct CrawlStats {
    fetched: usize,
    failed: usize,
    redirects: usize,
    dropped_links: usize,
}

/// Per-crawl state: one frontier, one report
pub struct Coordinator {
    client: Client,
    request: CrawlRequest,
    max_concurrent_pages: usize,
    frontier: Frontier,
    report: CrawlReport,
    stats: CrawlStats,
}

impl Coordinator {
    /// Creates a coordinator with the seed queued at depth 0
    pub fn new(client: Client, request: CrawlRequest, max_concurrent_pages: usize) -> Self {
        let seed = FrontierEntry {
            url: request.seed_url.clone(),
            key: normalize_url(request.seed_url.as_str())
                .map(|u| u.to_string())
                .unwrap_or_else(|_| request.seed_url.to_string()),
            depth: 0,
        };

        Self {
            client,
            frontier: Frontier::new(seed, request.max_depth),
            report: CrawlReport::new(request.seed.clone()),
            max_concurrent_pages: max_concurrent_pages.max(1),
            request,
            stats: CrawlStats::default(),
        }
    }

    /// Runs the crawl loop
    ///
    /// 1. Takes the next depth level from the frontier (visited entries removed)
    /// 2. Fetches the level concurrently
    /// 3. Extracts identifiers from each page into the report
    /// 4. Queues links of pages below the depth limit
    /// 5. Deduplicates the report once the frontier is empty
    ///
    /// A failure to fetch the seed page aborts the crawl with
    /// [`HarvestError::Timeout`] or [`HarvestError::Fetch`]. Failures on any
    /// other page only skip that page.
    pub async fn run(mut self) -> Result<CrawlReport, HarvestError> {
        tracing::info!(
            "Starting crawl of {} (max depth {})",
            self.request.seed,
            self.request.max_depth
        );
        let start_time = Instant::now();

        while let Some(level) = self.frontier.take_level() {
            let depth = level.first().map(|e| e.depth).unwrap_or_default();
            tracing::debug!("Fetching {} pages at depth {}", level.len(), depth);

            let client = self.client.clone();
            let mut results = stream::iter(level)
                .map(|entry| {
                    let client = client.clone();
                    async move {
                        let result = fetch_url(&client, &entry.url).await;
                        (entry, result)
                    }
                })
                .buffer_unordered(self.max_concurrent_pages);

            while let Some((entry, result)) = results.next().await {
                self.process_page(&entry, result)?;
            }
        }

        tracing::info!(
            "Crawl of {} completed: {} URLs visited, {} pages fetched, {} failed, {} redirects, {} links dropped in {:?}",
            self.request.seed,
            self.frontier.visited().len(),
            self.stats.fetched,
            self.stats.failed,
            self.stats.redirects,
            self.stats.dropped_links,
            start_time.elapsed()
        );

        Ok(self.report.dedup())
    }

    /// Handles one fetched page
    fn process_page(
        &mut self,
        entry: &FrontierEntry,
        result: FetchResult,
    ) -> Result<(), HarvestError> {
        let (final_url, body) = match result {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!("Fetched {} ({})", entry.url, status_code);
                (final_url, body)
            }
            FetchResult::Redirect {
                location,
                status_code,
            } => {
                self.stats.redirects += 1;
                tracing::debug!("{} redirected ({}) to {}", entry.url, status_code, location);

                if self.frontier.push_redirect(location.clone(), entry.depth) {
                    return Ok(());
                }

                self.stats.failed += 1;
                let message = format!("Redirect to unsupported URL {}", location);
                if entry.depth == 0 {
                    return Err(HarvestError::Fetch {
                        url: self.request.seed.clone(),
                        message,
                    });
                }
                tracing::warn!("Skipping {}: {}", entry.url, message);
                return Ok(());
            }
            failure => {
                self.stats.failed += 1;
                let message = failure.failure_message().unwrap_or_default();

                if entry.depth == 0 {
                    return Err(match failure {
                        FetchResult::Timeout => HarvestError::Timeout {
                            url: self.request.seed.clone(),
                        },
                        _ => HarvestError::Fetch {
                            url: self.request.seed.clone(),
                            message,
                        },
                    });
                }

                tracing::warn!("Skipping {}: {}", entry.url, message);
                return Ok(());
            }
        };

        self.stats.fetched += 1;
        let extraction = extract(&body, &final_url);

        if entry.depth < self.frontier.max_depth() {
            for href in &extraction.links {
                let queued = resolve_href(&final_url, href)
                    .map(|url| self.frontier.push_child(url, entry.depth))
                    .unwrap_or(false);

                if !queued {
                    tracing::trace!("Dropping link {} found on {}", href, final_url);
                    self.stats.dropped_links += 1;
                }
            }
        }

        self.report.absorb(extraction);
        Ok(())
    }
}
