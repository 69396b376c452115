//! Contact-Harvester: a depth-bounded contact crawler
//!
//! This crate crawls a website from a seed URL, extracts e-mail addresses,
//! phone numbers and social-profile links from every visited page, and exports
//! the aggregated reports as `;`-delimited text over a small HTTP API.

pub mod config;
pub mod crawler;
pub mod export;
pub mod report;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for Contact-Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Timeout error scraping {url}.")]
    Timeout { url: String },

    #[error("Error scraping {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Export-specific errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid file id: {0}")]
    InvalidFileId(String),

    #[error("Export file not found: {0}")]
    NotFound(String),

    #[error("Failed to format rows: {0}")]
    Format(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Contact-Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlRequest};
pub use report::CrawlReport;
pub use crate::url::{extract_domain, normalize_url};
