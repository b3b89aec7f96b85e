//! Top posts for a hashtag
//!
//! The structured node is the primary source. When it yields nothing, post
//! links in the raw markup are scanned instead.

use crate::crawler::node::{field, opt_array, opt_id, opt_object, opt_str};
use crate::{ExtractError, ExtractResult};
use scraper::{Html, Selector};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Upper bound on posts synthesized from markup anchors
pub const MAX_FALLBACK_POSTS: usize = 12;

const NO_EDGES: &[Value] = &[];

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("Failed to parse anchor selector"));

/// A single top post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPost {
    /// Identity of the post; never empty
    pub id: String,
    /// Content type label
    #[serde(rename = "type")]
    pub kind: String,
    pub short_code: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub url: String,
}

/// Splits a caption into hashtags and mentions
///
/// Whitespace-separated tokens longer than one character that start with `#`
/// (or `@`) are kept in order, duplicates included, with the marker
/// characters stripped from both ends.
///
/// # Example
///
/// ```
/// use hashtag_lens::extractors::parse_hashtags_and_mentions;
///
/// let (tags, mentions) = parse_hashtags_and_mentions("Sunset #beach with @ana #beach");
/// assert_eq!(tags, vec!["beach", "beach"]);
/// assert_eq!(mentions, vec!["ana"]);
/// ```
pub fn parse_hashtags_and_mentions(caption: &str) -> (Vec<String>, Vec<String>) {
    let mut hashtags = Vec::new();
    let mut mentions = Vec::new();

    for word in caption.split_whitespace() {
        if word.chars().count() <= 1 {
            continue;
        }
        if word.starts_with('#') {
            hashtags.push(word.trim_matches('#').trim().to_string());
        } else if word.starts_with('@') {
            mentions.push(word.trim_matches('@').trim().to_string());
        }
    }

    (hashtags, mentions)
}

/// Reads top posts from `edge_hashtag_to_top_posts.edges`
///
/// Edges without an id, or that fail to parse, are skipped.
pub fn top_posts_from_node(node: &Map<String, Value>, base_url: &str) -> Vec<TopPost> {
    let edges = match opt_object(node, "edge_hashtag_to_top_posts")
        .and_then(|top| top.map_or(Ok(NO_EDGES), |top| opt_array(top, "edges")))
    {
        Ok(edges) => edges,
        Err(e) => {
            tracing::debug!("Failed to read top post edges: {}", e);
            return Vec::new();
        }
    };

    edges
        .iter()
        .filter_map(|edge| match parse_post_edge(edge, base_url) {
            Ok(post) => post,
            Err(e) => {
                tracing::debug!("Failed to parse top post edge: {}", e);
                None
            }
        })
        .collect()
}

fn parse_post_edge(edge: &Value, base_url: &str) -> ExtractResult<Option<TopPost>> {
    let edge = edge.as_object().ok_or(ExtractError::WrongType {
        field: "edges[]",
        expected: "object",
    })?;
    let empty = Map::new();
    let node = opt_object(edge, "node")?.unwrap_or(&empty);

    let Some(id) = opt_id(node, "id")? else {
        return Ok(None);
    };

    let kind = opt_str(node, "__typename")?.unwrap_or("Post").to_string();
    let short_code = opt_str(node, "shortcode")?.unwrap_or_default().to_string();
    let caption = parse_caption(node)?;
    let (hashtags, mentions) = parse_hashtags_and_mentions(&caption);

    let url = if !short_code.is_empty() {
        format!("{}/p/{}/", base_url.trim_end_matches('/'), short_code)
    } else {
        opt_str(node, "display_url")?.unwrap_or_default().to_string()
    };

    Ok(Some(TopPost {
        id,
        kind,
        short_code,
        caption,
        hashtags,
        mentions,
        url,
    }))
}

/// Text of the first caption edge, or empty
fn parse_caption(node: &Map<String, Value>) -> ExtractResult<String> {
    let Some(captions) = opt_object(node, "edge_media_to_caption")? else {
        return Ok(String::new());
    };
    let Some(first) = opt_array(captions, "edges")?.first() else {
        return Ok(String::new());
    };

    let text = first
        .as_object()
        .and_then(|edge| field(edge, "node"))
        .and_then(Value::as_object)
        .and_then(|node| field(node, "text"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(text.to_string())
}

/// Synthesizes posts from `/p/...` links in raw markup
///
/// Anchors are visited in document order and collection stops after
/// `MAX_FALLBACK_POSTS`.
pub fn top_posts_from_anchors(html: &str, base_url: &str) -> Vec<TopPost> {
    let document = Html::parse_document(html);
    let base_url = base_url.trim_end_matches('/');

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| {
            let element = anchor.value();
            let href = element.attr("href")?;
            if !href.starts_with("/p/") {
                return None;
            }

            let short_code = href.split('/').nth(2).unwrap_or_default().to_string();
            let url = format!("{}{}", base_url, href);
            let caption = [element.attr("aria-label"), element.attr("title")]
                .into_iter()
                .flatten()
                .find(|text| !text.is_empty())
                .unwrap_or_default()
                .to_string();
            let (hashtags, mentions) = parse_hashtags_and_mentions(&caption);

            Some(TopPost {
                id: if short_code.is_empty() {
                    url.clone()
                } else {
                    short_code.clone()
                },
                kind: "Post".to_string(),
                short_code,
                caption,
                hashtags,
                mentions,
                url,
            })
        })
        .take(MAX_FALLBACK_POSTS)
        .collect()
}
