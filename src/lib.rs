//! Hashtag-Lens: resilient hashtag page analytics
//!
//! This crate scrapes public hashtag pages, recovers the structured data
//! embedded in them (falling back to raw markup scanning when it is missing),
//! and produces per-tag analytics records: post counts, top posts, and related
//! tags bucketed by frequency.

pub mod config;
pub mod crawler;
pub mod extractors;
pub mod output;

use thiserror::Error;

/// Main error type for Hashtag-Lens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No hashtags to process: {0}")]
    NoHashtags(String),
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

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised while reading fields out of a located hashtag node
///
/// These never leave the scraping entry points; they decide whether a single
/// edge is skipped or a stats record degrades to the minimal fallback.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Field '{field}' has unexpected type (expected {expected})")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Field '{field}' is not a valid count: {value}")]
    InvalidCount { field: &'static str, value: String },
}

/// Result type alias for Hashtag-Lens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for field extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{HashtagScraper, PageFetcher, ReqwestTransport, Transport};
pub use extractors::{RelatedBucketSet, TagStats, TopPost};
pub use output::HashtagRecord;
