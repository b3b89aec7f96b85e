use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::ConfigError;

/// Browser-like user agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0 Safari/537.36";

/// Main configuration structure for Hashtag-Lens
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Page fetching behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Site root that tag pages are resolved against
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Number of fetch attempts per tag page
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Pause after a failed attempt (seconds)
    #[serde(
        rename = "sleep-between-requests",
        default = "default_sleep_between_requests"
    )]
    pub sleep_between_requests: f64,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl ScraperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Pause between fetch attempts
    ///
    /// Fails for values no `Duration` can hold (negative, NaN, overflow).
    pub fn retry_delay(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.sleep_between_requests).map_err(|e| {
            ConfigError::Validation(format!(
                "sleep_between_requests {} is not a usable delay: {}",
                self.sleep_between_requests, e
            ))
        })
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            max_retries: default_max_retries(),
            sleep_between_requests: default_sleep_between_requests(),
            user_agent: default_user_agent(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the export files are written into
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: String,

    /// Formats written at the end of a run
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
        }
    }
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputFormat {
    Json,
    Csv,
    Html,
    Xlsx,
}

impl OutputFormat {
    /// Parses a comma-separated list such as `"json, csv"`
    ///
    /// Duplicates are removed; the result is in canonical order.
    pub fn parse_list(list: &str) -> Result<Vec<OutputFormat>, ConfigError> {
        Self::parse_all(list.split(','))
    }

    pub fn parse_all<'a, I>(items: I) -> Result<Vec<OutputFormat>, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut formats = Vec::new();
        for item in items {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            formats.push(item.parse::<OutputFormat>()?);
        }
        formats.sort();
        formats.dedup();
        Ok(formats)
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "html" => Ok(OutputFormat::Html),
            "excel" | "xlsx" => Ok(OutputFormat::Xlsx),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Html => "html",
            OutputFormat::Xlsx => "xlsx",
        };
        f.write_str(name)
    }
}

fn default_base_url() -> String {
    "https://www.instagram.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_sleep_between_requests() -> f64 {
    1.0
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_output_dir() -> String {
    "data".to_string()
}

fn default_formats() -> Vec<String> {
    vec!["json".to_string(), "csv".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scraper.base_url, "https://www.instagram.com");
        assert_eq!(config.scraper.max_retries, 3);
        assert_eq!(config.scraper.timeout(), Duration::from_secs(10));
        assert_eq!(config.scraper.retry_delay().unwrap(), Duration::from_secs(1));
        assert_eq!(config.output.formats, vec!["json", "csv"]);
    }

    #[test]
    fn test_parse_format_list() {
        let formats = OutputFormat::parse_list("CSV, json,,csv").unwrap();
        assert_eq!(formats, vec![OutputFormat::Json, OutputFormat::Csv]);
    }

    #[test]
    fn test_retry_delay_rejects_unrepresentable_values() {
        let mut config = ScraperConfig::default();
        config.sleep_between_requests = 1e300;
        assert!(matches!(config.retry_delay(), Err(ConfigError::Validation(_))));

        config.sleep_between_requests = f64::NAN;
        assert!(config.retry_delay().is_err());

        config.sleep_between_requests = 0.25;
        assert_eq!(config.retry_delay().unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_excel_aliases_xlsx() {
        let formats = OutputFormat::parse_list("excel, xlsx,json").unwrap();
        assert_eq!(formats, vec![OutputFormat::Json, OutputFormat::Xlsx]);
        assert_eq!(OutputFormat::Xlsx.to_string(), "xlsx");
    }

    #[test]
    fn test_unknown_format_is_unsupported() {
        let result = OutputFormat::parse_list("json,pdf");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(f)) if f == "pdf"));
    }
}
