//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with user agent and timeouts
//! - GET requests to fetch page content
//! - Error classification (timeout, transport, non-2xx status)
//!
//! Redirects are not followed by the client. A 3xx answer with a usable
//! `Location` comes back as [`FetchResult::Redirect`] so the crawl engine can
//! queue the target like any other URL and check it against its visited set.
//!
//! There is no retry logic: a failed fetch is final for that URL within a
//! crawl.

use crate::config::UserAgentConfig;
use crate::url::resolve_href;
use reqwest::header::LOCATION;
use reqwest::{redirect, Client};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// URL the body was served from
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server redirected to another URL
    Redirect {
        /// Redirect target, resolved against the requested URL
        location: Url,
        /// HTTP status code (3xx)
        status_code: u16,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request did not complete within the configured timeout
    Timeout,

    /// Network error (DNS failure, connection refused, body read failure, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Short description of a failed fetch, `None` on success
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::Success { .. } | Self::Redirect { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::Timeout => Some("Request timeout".to_string()),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Upper bound for a whole request, body included
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use contact_harvester::config::UserAgentConfig;
/// use contact_harvester::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(redirect::Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Success` with the body |
/// | 3xx with a resolvable `Location` | `Redirect` |
/// | Other status | `HttpError` |
/// | Timeout (request or body) | `Timeout` |
/// | Anything else | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    if status.is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| resolve_href(url, value));

        if let Some(location) = location {
            return FetchResult::Redirect {
                location,
                status_code: status.as_u16(),
            };
        }
    }

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_error(e),
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::Timeout
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
        }
    }
}
