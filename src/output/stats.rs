//! Run summary
//!
//! Counts what a run produced so degraded tags are visible at a glance.

use crate::output::HashtagRecord;

/// Totals over one run's records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of tags processed
    pub total_tags: usize,

    /// Tags that produced a non-minimal stats record
    pub tags_with_data: usize,

    /// Tags whose stats fell back to the minimal record
    pub minimal_tags: Vec<String>,

    /// Top posts collected across all tags
    pub total_top_posts: usize,

    /// Related tags collected across all tags
    pub total_related_tags: usize,
}

impl RunSummary {
    pub fn from_records(records: &[HashtagRecord]) -> Self {
        let mut summary = Self {
            total_tags: records.len(),
            ..Self::default()
        };

        for record in records {
            if record.stats.is_minimal() {
                summary.minimal_tags.push(record.stats.name.clone());
            } else {
                summary.tags_with_data += 1;
            }
            summary.total_top_posts += record.top_posts.len();
            summary.total_related_tags += record.relations.related.len();
        }

        summary
    }

    /// Share of tags that produced data, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_tags == 0 {
            return 0.0;
        }
        (self.tags_with_data as f64 / self.total_tags as f64) * 100.0
    }
}

/// Prints a run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Hashtag Summary ===\n");

    println!("Overview:");
    println!("  Tags processed: {}", summary.total_tags);
    println!(
        "  Tags with data: {} ({:.1}%)",
        summary.tags_with_data,
        summary.success_rate()
    );
    println!("  Top posts collected: {}", summary.total_top_posts);
    println!("  Related tags collected: {}", summary.total_related_tags);
    println!();

    if !summary.minimal_tags.is_empty() {
        // Zero-post tags and failed scrapes look the same here
        println!(
            "Minimal Records ({}):",
            summary.minimal_tags.len()
        );
        for tag in &summary.minimal_tags {
            println!("  - #{}", tag);
        }
        println!();
    }
}
