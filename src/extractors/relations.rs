//! Related tag bucketization
//!
//! Related tags are ranked by media count and split into frequent, average
//! and rare buckets relative to the most popular one.

use crate::crawler::node::{coerce_count, opt_array, opt_object, opt_str};
use crate::{ExtractError, ExtractResult};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{Map, Value};

/// Share of the top count at or above which a tag is "frequent"
pub const FREQUENT_RATIO: f64 = 0.6;

/// Share of the top count at or below which a tag is "rare"
pub const RARE_RATIO: f64 = 0.2;

const NO_EDGES: &[Value] = &[];

/// A related tag as read from the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedTag {
    pub name: String,
    pub media_count: u64,
}

impl RelatedTag {
    pub fn new(name: impl Into<String>, media_count: u64) -> Self {
        Self {
            name: name.into(),
            media_count,
        }
    }
}

/// Exported form of a related tag
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BucketEntry {
    /// Tag name prefixed with `#`
    pub hash: String,
    /// Media count
    pub info: u64,
}

impl From<&RelatedTag> for BucketEntry {
    fn from(tag: &RelatedTag) -> Self {
        Self {
            hash: format!("#{}", tag.name),
            info: tag.media_count,
        }
    }
}

/// Related tags grouped by popularity
///
/// `related` holds every tag, most popular first. The semantic buckets
/// (`relatedFrequent`, `relatedAverage`, `relatedRare`) draw from the same
/// pool as the literal ones, so they are serialized as copies of `frequent`,
/// `average` and `rare`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedBucketSet {
    pub related: Vec<BucketEntry>,
    pub frequent: Vec<BucketEntry>,
    pub average: Vec<BucketEntry>,
    pub rare: Vec<BucketEntry>,
}

impl RelatedBucketSet {
    /// All seven fields empty
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn related_frequent(&self) -> &[BucketEntry] {
        &self.frequent
    }

    pub fn related_average(&self) -> &[BucketEntry] {
        &self.average
    }

    pub fn related_rare(&self) -> &[BucketEntry] {
        &self.rare
    }

    pub fn is_empty(&self) -> bool {
        self.related.is_empty()
    }
}

impl Serialize for RelatedBucketSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RelatedBucketSet", 7)?;
        state.serialize_field("related", &self.related)?;
        state.serialize_field("frequent", &self.frequent)?;
        state.serialize_field("average", &self.average)?;
        state.serialize_field("rare", &self.rare)?;
        state.serialize_field("relatedFrequent", self.related_frequent())?;
        state.serialize_field("relatedAverage", self.related_average())?;
        state.serialize_field("relatedRare", self.related_rare())?;
        state.end()
    }
}

/// Reads related tags from `edge_hashtag_to_related_tags.edges`
///
/// Edges without a name are dropped; edges that fail to parse are skipped
/// individually.
pub fn collect_related_tags(node: &Map<String, Value>) -> Vec<RelatedTag> {
    let edges = match opt_object(node, "edge_hashtag_to_related_tags") {
        Ok(Some(related)) => opt_array(related, "edges"),
        Ok(None) => Ok(NO_EDGES),
        Err(e) => Err(e),
    };

    let edges = match edges {
        Ok(edges) => edges,
        Err(e) => {
            tracing::debug!("Failed to read related tag edges: {}", e);
            return Vec::new();
        }
    };

    edges
        .iter()
        .filter_map(|edge| match parse_related_edge(edge) {
            Ok(tag) => tag,
            Err(e) => {
                tracing::debug!("Failed to parse related tag edge: {}", e);
                None
            }
        })
        .collect()
}

fn parse_related_edge(edge: &Value) -> ExtractResult<Option<RelatedTag>> {
    let edge = edge.as_object().ok_or(ExtractError::WrongType {
        field: "edges[]",
        expected: "object",
    })?;
    let Some(node) = opt_object(edge, "node")? else {
        return Ok(None);
    };
    let Some(name) = opt_str(node, "name")? else {
        return Ok(None);
    };

    let media_count = match opt_object(node, "edge_hashtag_to_media")? {
        Some(media) => coerce_count(media.get("count"), "edge_hashtag_to_media.count")?,
        None => 0,
    };

    Ok(Some(RelatedTag::new(name, media_count)))
}

/// Splits related tags into frequency buckets
///
/// Tags are sorted by media count, descending; the sort is stable, so tags
/// with equal counts keep their input order. With `max` the highest count
/// (at least 1), a tag is frequent when its count is `>= max * 0.6`, otherwise
/// rare when `<= max * 0.2`, otherwise average. When every count is equal,
/// every tag is frequent.
pub fn bucketize(mut tags: Vec<RelatedTag>) -> RelatedBucketSet {
    if tags.is_empty() {
        return RelatedBucketSet::empty();
    }

    tags.sort_by(|a, b| b.media_count.cmp(&a.media_count));

    let max_count = tags
        .iter()
        .map(|t| t.media_count)
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let frequent_threshold = max_count * FREQUENT_RATIO;
    let rare_threshold = max_count * RARE_RATIO;

    let mut buckets = RelatedBucketSet::empty();
    for tag in &tags {
        let entry = BucketEntry::from(tag);
        let count = tag.media_count as f64;
        if count >= frequent_threshold {
            buckets.frequent.push(entry);
        } else if count <= rare_threshold {
            buckets.rare.push(entry);
        } else {
            buckets.average.push(entry);
        }
    }

    buckets.related = tags.iter().map(BucketEntry::from).collect();
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hashes(entries: &[BucketEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.hash.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let buckets = bucketize(vec![]);
        assert_eq!(buckets, RelatedBucketSet::empty());

        let value = serde_json::to_value(&buckets).unwrap();
        for key in [
            "related",
            "frequent",
            "average",
            "rare",
            "relatedFrequent",
            "relatedAverage",
            "relatedRare",
        ] {
            assert_eq!(value[key], json!([]), "{}", key);
        }
    }

    #[test]
    fn test_bucket_thresholds() {
        let buckets = bucketize(vec![
            RelatedTag::new("low", 10),
            RelatedTag::new("top", 100),
            RelatedTag::new("mid", 40),
            RelatedTag::new("edge_frequent", 60),
            RelatedTag::new("edge_rare", 20),
        ]);

        assert_eq!(
            hashes(&buckets.related),
            vec!["#top", "#edge_frequent", "#mid", "#edge_rare", "#low"]
        );
        assert_eq!(hashes(&buckets.frequent), vec!["#top", "#edge_frequent"]);
        assert_eq!(hashes(&buckets.average), vec!["#mid"]);
        assert_eq!(hashes(&buckets.rare), vec!["#edge_rare", "#low"]);
        assert_eq!(buckets.related[0].info, 100);
    }

    #[test]
    fn test_partition_is_exhaustive() {
        let tags: Vec<RelatedTag> = (0..25)
            .map(|i| RelatedTag::new(format!("t{}", i), (i * 37 % 101) as u64))
            .collect();
        let buckets = bucketize(tags);

        assert_eq!(buckets.related.len(), 25);
        assert_eq!(
            buckets.frequent.len() + buckets.average.len() + buckets.rare.len(),
            25
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let buckets = bucketize(vec![
            RelatedTag::new("b", 5),
            RelatedTag::new("a", 50),
            RelatedTag::new("c", 5),
            RelatedTag::new("d", 50),
        ]);
        assert_eq!(hashes(&buckets.related), vec!["#a", "#d", "#b", "#c"]);
    }

    #[test]
    fn test_equal_counts_are_all_frequent() {
        let buckets = bucketize(vec![
            RelatedTag::new("a", 100),
            RelatedTag::new("b", 100),
            RelatedTag::new("c", 100),
        ]);
        assert_eq!(hashes(&buckets.frequent), vec!["#a", "#b", "#c"]);
        assert!(buckets.average.is_empty());
        assert!(buckets.rare.is_empty());
    }

    #[test]
    fn test_all_zero_counts_are_rare() {
        // max floors at 1: 0 >= 0.6 fails, 0 <= 0.2 holds
        let buckets = bucketize(vec![RelatedTag::new("a", 0), RelatedTag::new("b", 0)]);
        assert!(buckets.frequent.is_empty());
        assert_eq!(hashes(&buckets.rare), vec!["#a", "#b"]);
    }

    #[test]
    fn test_semantic_buckets_alias_literal_buckets() {
        let buckets = bucketize(vec![
            RelatedTag::new("a", 100),
            RelatedTag::new("b", 50),
            RelatedTag::new("c", 1),
        ]);
        let value = serde_json::to_value(&buckets).unwrap();

        assert_eq!(value["relatedFrequent"], value["frequent"]);
        assert_eq!(value["relatedAverage"], value["average"]);
        assert_eq!(value["relatedRare"], value["rare"]);
        assert_eq!(value["frequent"], json!([{"hash": "#a", "info": 100}]));
    }

    #[test]
    fn test_collect_related_tags() {
        let node = json!({
            "edge_hashtag_to_related_tags": {"edges": [
                {"node": {"name": "beach", "edge_hashtag_to_media": {"count": 300}}},
                {"node": {"name": "", "edge_hashtag_to_media": {"count": 1}}},
                {"node": {"name": "sea"}},
                {"node": {"name": "bad", "edge_hashtag_to_media": {"count": "lots"}}},
                {"node": {"name": 7}},
                42
            ]}
        });

        let tags = collect_related_tags(node.as_object().unwrap());
        assert_eq!(
            tags,
            vec![RelatedTag::new("beach", 300), RelatedTag::new("sea", 0)]
        );
    }

    #[test]
    fn test_collect_without_related_edges() {
        let node = json!({"name": "lonely"});
        assert!(collect_related_tags(node.as_object().unwrap()).is_empty());

        let node = json!({"edge_hashtag_to_related_tags": "oops"});
        assert!(collect_related_tags(node.as_object().unwrap()).is_empty());
    }
}
