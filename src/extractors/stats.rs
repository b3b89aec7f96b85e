//! Hashtag-level statistics
//!
//! Turns the hashtag node into a `TagStats` record. The page only exposes a
//! lifetime post total, so the daily rate is an estimate over a fixed window.

use crate::crawler::node::{coerce_count, opt_object, opt_str};
use crate::ExtractResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// Assumed lifetime of a hashtag, in days (five years)
pub const ESTIMATED_ACTIVE_DAYS: f64 = 5.0 * 365.0;

const UNITS: [&str; 5] = ["", "K", "M", "G", "T"];

/// Statistics for one hashtag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagStats {
    pub name: String,
    pub posts_count: u64,
    pub url: String,
    /// Humanized `posts_count`, e.g. `"2.5 K"`
    pub posts: String,
    pub posts_per_day: f64,
}

impl TagStats {
    /// Zero-valued record used whenever no real data could be extracted
    pub fn minimal(tag: &str, url: &str) -> Self {
        Self {
            name: tag.trim_start_matches('#').to_string(),
            posts_count: 0,
            url: url.to_string(),
            posts: "0".to_string(),
            posts_per_day: 0.0,
        }
    }

    /// Whether this record has the shape of the minimal fallback
    ///
    /// A hashtag with genuinely zero posts looks the same.
    pub fn is_minimal(&self) -> bool {
        self.posts_count == 0 && self.posts == "0"
    }
}

/// Builds stats from a resolved hashtag node
///
/// A count that cannot be read becomes 0. A `name` that is not a string, or
/// an `edge_hashtag_to_media` that is not an object, is an error; callers
/// substitute `TagStats::minimal`.
pub fn build_stats(tag: &str, url: &str, node: &Map<String, Value>) -> ExtractResult<TagStats> {
    let name = opt_str(node, "name")?
        .unwrap_or_else(|| tag.trim_start_matches('#'))
        .to_string();

    let posts_count = match opt_object(node, "edge_hashtag_to_media")? {
        Some(media) => coerce_count(media.get("count"), "edge_hashtag_to_media.count")
            .unwrap_or_else(|e| {
                tracing::debug!("Treating unreadable post count as 0: {}", e);
                0
            }),
        None => 0,
    };

    let posts_per_day = estimate_posts_per_day(posts_count);

    tracing::debug!(
        "Parsed hashtag stats name={} postsCount={} postsPerDay={}",
        name,
        posts_count,
        posts_per_day
    );

    Ok(TagStats {
        name,
        posts_count,
        url: url.to_string(),
        posts: humanize_posts_count(posts_count),
        posts_per_day,
    })
}

/// Rough posts-per-day figure from a lifetime total
///
/// Rounded to 2 decimals; 0.0 for an empty tag.
pub fn estimate_posts_per_day(posts_count: u64) -> f64 {
    if posts_count == 0 {
        return 0.0;
    }
    round2(posts_count as f64 / ESTIMATED_ACTIVE_DAYS)
}

/// Compact human-readable count
///
/// | Input | Output |
/// |-------|--------|
/// | 0 | `"0"` |
/// | 999 | `"999"` |
/// | 1234 | `"1.23 K"` |
/// | 5600000 | `"5.6 M"` |
/// | 2150000000 | `"2.15 G"` |
///
/// Scaled values keep at least one decimal (`1000` is `"1.0 K"`).
pub fn humanize_posts_count(value: u64) -> String {
    let mut n = value as f64;
    let mut unit = 0;

    while n.abs() >= 1000.0 && unit < UNITS.len() - 1 {
        n /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        return value.to_string();
    }

    format!("{} {}", format_scaled(n), UNITS[unit])
}

/// Two-decimal rendering with redundant trailing zeros dropped
fn format_scaled(n: f64) -> String {
    let fixed = format!("{:.2}", n);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}
