use serde::Deserialize;

/// Main configuration structure for Contact-Harvester
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (overridden by the PORT environment variable)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted JSON body size, in megabytes
    #[serde(rename = "body-limit-mb", default = "default_body_limit_mb")]
    pub body_limit_mb: usize,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Highest depth a caller may request
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of concurrent page fetches within one crawl
    #[serde(
        rename = "max-concurrent-pages-open",
        default = "default_max_concurrent_pages_open"
    )]
    pub max_concurrent_pages_open: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of crawls running at the same time
    #[serde(rename = "max-concurrent-crawls", default = "default_max_concurrent_crawls")]
    pub max_concurrent_crawls: u32,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default = "default_contact_email")]
    pub contact_email: String,
}

/// Export file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory holding the generated export files
    #[serde(rename = "uploads-dir", default = "default_uploads_dir")]
    pub uploads_dir: String,

    /// Six-field cron expression for the uploads sweep
    #[serde(rename = "cleanup-schedule", default = "default_cleanup_schedule")]
    pub cleanup_schedule: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9001
}

fn default_body_limit_mb() -> usize {
    50
}

fn default_max_depth() -> u32 {
    5
}

fn default_max_concurrent_pages_open() -> u32 {
    8
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_concurrent_crawls() -> u32 {
    4
}

fn default_crawler_name() -> String {
    "ContactHarvester".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://example.com/about".to_string()
}

fn default_contact_email() -> String {
    "admin@example.com".to_string()
}

fn default_uploads_dir() -> String {
    "./uploads".to_string()
}

fn default_cleanup_schedule() -> String {
    // daily at midnight
    "0 0 0 * * *".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_mb: default_body_limit_mb(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_concurrent_pages_open: default_max_concurrent_pages_open(),
            request_timeout_secs: default_request_timeout_secs(),
            max_concurrent_crawls: default_max_concurrent_crawls(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
            contact_email: default_contact_email(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            cleanup_schedule: default_cleanup_schedule(),
        }
    }
}
