use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Values supplied on the command line
///
/// Each `Some` field replaces the corresponding value from the config file
/// (or the built-in default when no file is given).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub delay_secs: Option<f64>,
    pub timeout_secs: Option<f64>,
    pub max_articles: Option<usize>,
    pub respect_robots_txt: Option<bool>,
}

impl ConfigOverrides {
    /// Applies the overrides onto `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(delay) = self.delay_secs {
            config.crawler.delay_secs = delay;
        }
        if let Some(timeout) = self.timeout_secs {
            config.crawler.timeout_secs = timeout;
        }
        if let Some(max) = self.max_articles {
            config.crawler.max_articles = Some(max);
        }
        if let Some(respect) = self.respect_robots_txt {
            config.crawler.respect_robots_txt = respect;
        }
    }
}

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
/// use clickbait_scraper::config::load_config;
///
/// let config = load_config(Path::new("site.toml")).unwrap();
/// println!("Delay: {}s", config.crawler.delay_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so runs with different site profiles can be told apart.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Resolves the effective configuration for a run
///
/// Starts from the config file when one is given (built-in defaults
/// otherwise), applies command-line overrides and validates the result.
/// Returns the config file hash alongside when a file was read.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<(Config, Option<String>), ConfigError> {
    let (mut config, hash) = match path {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    overrides.apply(&mut config);
    validate(&config)?;

    Ok((config, hash))
}
