//! Scraper façade
//!
//! `HashtagScraper` runs fetch → payload → node → builders and guarantees a
//! well-formed result at every public entry point. Failures only show up in
//! the logs and in the shape of the fallback values.

use super::fetcher::{PageFetcher, ReqwestTransport, Transport};
use super::node::resolve_node;
use super::payload::locate_payload;
use crate::config::ScraperConfig;
use crate::extractors::{
    bucketize, build_stats, collect_related_tags, top_posts_from_anchors, top_posts_from_node,
    RelatedBucketSet, TagStats, TopPost,
};
use crate::output::HashtagRecord;
use crate::{ConfigResult, LensError};
use serde_json::{Map, Value};

/// Markup of one fetch and the payload located in it
struct PageData<'a> {
    markup: Option<&'a str>,
    payload: Option<Value>,
}

impl<'a> PageData<'a> {
    fn parse(markup: Option<&'a str>) -> Self {
        let payload = markup.and_then(locate_payload);
        Self { markup, payload }
    }

    fn node(&self) -> Option<&Map<String, Value>> {
        self.payload.as_ref().and_then(resolve_node)
    }
}

/// Per-tag analytics scraper
///
/// Holds only read-only configuration, so one instance can serve any number
/// of tags.
#[derive(Debug, Clone)]
pub struct HashtagScraper<T = ReqwestTransport> {
    fetcher: PageFetcher<T>,
}

impl HashtagScraper<ReqwestTransport> {
    /// Creates a scraper backed by a fresh `reqwest` client
    pub fn new(config: &ScraperConfig) -> Result<Self, LensError> {
        Ok(Self::with_transport(ReqwestTransport::new()?, config)?)
    }
}

impl<T: Transport> HashtagScraper<T> {
    pub fn with_transport(transport: T, config: &ScraperConfig) -> ConfigResult<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(transport, config)?,
        })
    }

    pub fn fetcher(&self) -> &PageFetcher<T> {
        &self.fetcher
    }

    /// Canonical page URL for `tag`
    pub fn page_url(&self, tag: &str) -> String {
        self.fetcher.page_url(tag)
    }

    /// Best-effort statistics for a hashtag
    ///
    /// Returns `TagStats::minimal` when the page cannot be fetched, carries no
    /// payload or node, or the node cannot be read.
    pub async fn fetch_stats(&self, tag: &str) -> TagStats {
        let markup = self.fetcher.fetch(tag).await;
        self.stats_from_markup(tag, markup.as_deref())
    }

    /// Top posts for a hashtag; empty when the page cannot be fetched
    pub async fn collect_top_posts(&self, tag: &str) -> Vec<TopPost> {
        let markup = self.fetcher.fetch(tag).await;
        self.top_posts_from_markup(tag, markup.as_deref())
    }

    /// Related tags of a hashtag, bucketed by popularity
    pub async fn map_relations(&self, tag: &str) -> RelatedBucketSet {
        let markup = self.fetcher.fetch(tag).await;
        self.relations_from_markup(tag, markup.as_deref())
    }

    /// Full record for a hashtag from a single page fetch
    pub async fn scrape(&self, tag: &str) -> HashtagRecord {
        let markup = self.fetcher.fetch(tag).await;
        self.record_from_markup(tag, markup.as_deref())
    }

    pub fn stats_from_markup(&self, tag: &str, markup: Option<&str>) -> TagStats {
        self.stats_for(tag, &PageData::parse(markup))
    }

    pub fn top_posts_from_markup(&self, tag: &str, markup: Option<&str>) -> Vec<TopPost> {
        self.top_posts_for(tag, &PageData::parse(markup))
    }

    pub fn relations_from_markup(&self, tag: &str, markup: Option<&str>) -> RelatedBucketSet {
        self.relations_for(tag, &PageData::parse(markup))
    }

    pub fn record_from_markup(&self, tag: &str, markup: Option<&str>) -> HashtagRecord {
        let page = PageData::parse(markup);
        HashtagRecord::new(
            self.stats_for(tag, &page),
            self.top_posts_for(tag, &page),
            self.relations_for(tag, &page),
        )
    }

    fn stats_for(&self, tag: &str, page: &PageData<'_>) -> TagStats {
        let url = self.page_url(tag);

        let Some(node) = page.node() else {
            tracing::info!(
                "Falling back to minimal stats for hashtag {} (no structured data found).",
                tag
            );
            return TagStats::minimal(tag, &url);
        };

        match build_stats(tag, &url, node) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!("Error parsing stats for hashtag {}: {}", tag, e);
                TagStats::minimal(tag, &url)
            }
        }
    }

    fn top_posts_for(&self, tag: &str, page: &PageData<'_>) -> Vec<TopPost> {
        let Some(markup) = page.markup else {
            tracing::info!(
                "No HTML available for hashtag {}, returning empty topPosts.",
                tag
            );
            return Vec::new();
        };

        if let Some(node) = page.node() {
            let posts = top_posts_from_node(node, self.fetcher.base_url());
            if !posts.is_empty() {
                tracing::debug!(
                    "Parsed {} top posts for hashtag {} using JSON.",
                    posts.len(),
                    tag
                );
                return posts;
            }
        }

        tracing::info!(
            "Falling back to HTML-based extraction for top posts of hashtag {}.",
            tag
        );
        top_posts_from_anchors(markup, self.fetcher.base_url())
    }

    fn relations_for(&self, tag: &str, page: &PageData<'_>) -> RelatedBucketSet {
        if page.markup.is_none() {
            tracing::info!(
                "No HTML available for hashtag {}, skipping relation mapping.",
                tag
            );
            return RelatedBucketSet::empty();
        }

        let Some(payload) = &page.payload else {
            tracing::info!(
                "No JSON payload available for hashtag {}, skipping relation mapping.",
                tag
            );
            return RelatedBucketSet::empty();
        };

        let Some(node) = resolve_node(payload) else {
            tracing::info!("No hashtag node found for {}, skipping relation mapping.", tag);
            return RelatedBucketSet::empty();
        };

        let related = collect_related_tags(node);
        tracing::debug!(
            "Collected {} raw related tags for hashtag {}.",
            related.len(),
            tag
        );
        bucketize(related)
    }
}
