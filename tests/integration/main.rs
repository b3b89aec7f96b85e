//! Integration tests for the scraper
//!
//! These tests use wiremock to serve tag pages and run the full
//! fetch → payload → node → records → export cycle end-to-end.

mod export_tests;
mod scrape_tests;
