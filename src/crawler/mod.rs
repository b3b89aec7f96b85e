//! Crawler module for tag page fetching and payload recovery
//!
//! This module contains the extraction pipeline up to the hashtag node:
//! - HTTP fetching with retry logic behind a swappable transport
//! - Locating the structured payload embedded in page markup
//! - Resolving the hashtag node inside that payload
//! - The `HashtagScraper` façade tying the stages to the record builders

mod fetcher;
pub mod node;
mod payload;
mod pipeline;

#[cfg(test)]
pub(crate) mod testing;

pub use fetcher::{
    build_http_client, build_tag_url, HttpResponse, PageFetcher, ReqwestTransport, Transport,
    TransportError, ACCEPT_LANGUAGE_VALUE,
};
pub use node::{get_path, resolve_node, PathKey};
pub use payload::locate_payload;
pub use pipeline::HashtagScraper;
