//! Configuration module for Contact-Harvester
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys fall back to built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use contact_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvester.toml")).unwrap();
//! println!("Crawler will accept depths up to: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{Config, CrawlerConfig, ExportConfig, ServerConfig, UserAgentConfig};

pub use parser::{
    apply_env_overrides, load_config, load_config_with_hash, parse_config,
};
pub use validation::validate;
