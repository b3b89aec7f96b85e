//! Merged per-tag record and its flat tabular form

use crate::extractors::{RelatedBucketSet, TagStats, TopPost};
use crate::output::traits::{OutputError, OutputResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Everything known about one hashtag
///
/// Serializes to the stats fields, `topPosts`, and the seven bucket fields at
/// the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HashtagRecord {
    #[serde(flatten)]
    pub stats: TagStats,
    #[serde(rename = "topPosts")]
    pub top_posts: Vec<TopPost>,
    #[serde(flatten)]
    pub relations: RelatedBucketSet,
}

impl HashtagRecord {
    pub fn new(stats: TagStats, top_posts: Vec<TopPost>, relations: RelatedBucketSet) -> Self {
        Self {
            stats,
            top_posts,
            relations,
        }
    }

    /// Flat field → text mapping for tabular formats
    ///
    /// Arrays and objects are JSON-encoded, strings are kept verbatim and
    /// other scalars use their JSON text. Keys come out sorted.
    pub fn flatten(&self) -> OutputResult<BTreeMap<String, String>> {
        let Value::Object(fields) = serde_json::to_value(self)? else {
            return Err(OutputError::Format(
                "hashtag record did not serialize to an object".to_string(),
            ));
        };

        fields
            .into_iter()
            .map(|(key, value)| cell_text(&value).map(|text| (key, text)))
            .collect()
    }
}

/// Flattened records laid out as a table
///
/// Columns are the sorted union of every row's keys; a row without a column
/// reads as an empty cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTable {
    pub columns: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

impl FlatTable {
    pub fn from_records(records: &[HashtagRecord]) -> OutputResult<Self> {
        let rows = records
            .iter()
            .map(HashtagRecord::flatten)
            .collect::<OutputResult<Vec<_>>>()?;
        let columns: BTreeSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();

        Ok(Self {
            columns: columns.into_iter().cloned().collect(),
            rows,
        })
    }

    /// Cells of one row in column order
    pub fn cells<'a>(
        &'a self,
        row: &'a BTreeMap<String, String>,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.columns
            .iter()
            .map(move |column| row.get(column).map(String::as_str).unwrap_or_default())
    }
}

fn cell_text(value: &Value) -> OutputResult<String> {
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)?,
        Value::Bool(_) | Value::Number(_) => value.to_string(),
    })
}
