use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
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
/// use hashtag_lens::config::load_config;
///
/// let config = load_config(Path::new("config/settings.toml")).unwrap();
/// println!("Max retries: {}", config.scraper.max_retries);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates settings from TOML text
///
/// Every key is optional; missing keys take their defaults. A trailing `/`
/// on `base-url` is removed so page URLs can be built by plain concatenation.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(content)?;

    let trimmed = config.scraper.base_url.trim().trim_end_matches('/').to_string();
    config.scraper.base_url = trimmed;

    validate(&config)?;

    Ok(config)
}

/// Loads a settings file, falling back to defaults when it does not exist
///
/// A file that exists but cannot be read or parsed is still an error.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::warn!(
            "Settings file {} not found. Using default settings.",
            path.display()
        );
        return Ok(Config::default());
    }

    load_config(path)
}
