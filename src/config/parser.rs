use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use contact_harvester::config::load_config;
///
/// let config = load_config(Path::new("harvester.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 of the configuration text
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Loads a configuration and returns both the config and the SHA-256 hash
/// of the file content
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

/// Applies overrides taken from the process environment
///
/// `PORT` replaces the configured listener port when it holds a valid,
/// non-zero port number.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
    apply_port_override(config, std::env::var("PORT").ok().as_deref())
}

fn apply_port_override(config: &mut Config, port: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = port else {
        return Ok(());
    };

    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => {
            config.server.port = port;
            Ok(())
        }
        _ => Err(ConfigError::Validation(format!(
            "PORT must be a port number between 1 and 65535, got '{}'",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[server]
host = "127.0.0.1"
port = 8080

[crawler]
max-depth = 3
max-concurrent-pages-open = 10
request-timeout-secs = 5
max-concurrent-crawls = 2

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[export]
uploads-dir = "/tmp/uploads"
cleanup-schedule = "0 30 1 * * *"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.crawler.max_depth, 3);
        assert_eq!(config.crawler.max_concurrent_pages_open, 10);
        assert_eq!(config.user_agent.crawler_name, "TestCrawler");
        assert_eq!(config.export.uploads_dir, "/tmp/uploads");
        assert_eq!(config.export.cleanup_schedule, "0 30 1 * * *");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[crawler]\nmax-depth = 2\n").unwrap();

        assert_eq!(config.crawler.max_depth, 2);
        assert_eq!(config.crawler.max_concurrent_pages_open, 8);
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.body_limit_mb, 50);
        assert_eq!(config.export.uploads_dir, "./uploads");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvester.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\nmax-concurrent-pages-open = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_hash_content() {
        let hash1 = hash_content("test content");
        let hash2 = hash_content("test content");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, hash_content("other content"));
    }

    #[test]
    fn test_load_with_hash_matches_content() {
        let content = "[server]\nport = 9100\n";
        let file = create_temp_config(content);
        let (config, hash) = load_config_with_hash(file.path()).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(hash, hash_content(content));
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        apply_port_override(&mut config, Some("7000")).unwrap();
        assert_eq!(config.server.port, 7000);

        apply_port_override(&mut config, None).unwrap();
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = Config::default();
        assert!(apply_port_override(&mut config, Some("zero")).is_err());
        assert!(apply_port_override(&mut config, Some("0")).is_err());
        assert_eq!(config.server.port, 9001);
    }
}
