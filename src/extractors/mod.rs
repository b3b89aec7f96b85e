//! Record builders for a resolved hashtag node
//!
//! Each builder consumes the same node independently:
//! - `stats`: post count, humanized count, posts-per-day estimate
//! - `posts`: top posts, with an anchor-scanning fallback over raw markup
//! - `relations`: related tags bucketed by relative popularity

pub mod posts;
pub mod relations;
pub mod stats;

pub use posts::{
    parse_hashtags_and_mentions, top_posts_from_anchors, top_posts_from_node, TopPost,
    MAX_FALLBACK_POSTS,
};
pub use relations::{bucketize, collect_related_tags, BucketEntry, RelatedBucketSet, RelatedTag};
pub use stats::{build_stats, estimate_posts_per_day, humanize_posts_count, TagStats};
