//! Configuration module for Hashtag-Lens
//!
//! This module handles loading, parsing, and validating TOML settings files,
//! plus reading the newline-delimited hashtag lists fed to the scraper.
//!
//! # Example
//!
//! ```no_run
//! use hashtag_lens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config/settings.toml")).unwrap();
//! println!("Scraping against: {}", config.scraper.base_url);
//! ```

mod hashtags;
mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, OutputFormat, ScraperConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use hashtags::{load_hashtag_list, parse_hashtag_list};
pub use parser::{load_config, load_config_or_default, parse_config};
