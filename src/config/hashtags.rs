//! Hashtag list input
//!
//! Lists are plain text, one tag per line. `// ...` and `# ...` (hash followed
//! by a space) lines are comments; `#travel` and `travel` are the same tag.

use std::collections::HashSet;
use std::path::Path;

use crate::ConfigError;

/// Reads a newline-delimited hashtag list from disk
pub fn load_hashtag_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_hashtag_list(&content))
}

/// Parses hashtag list text, de-duplicating while preserving order
pub fn parse_hashtag_list(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for line in content.lines() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with("//") || raw.starts_with("# ") {
            continue;
        }

        let tag = raw.trim_start_matches('#').trim();
        if tag.is_empty() {
            continue;
        }

        if seen.insert(tag.to_string()) {
            tags.push(tag.to_string());
        }
    }

    tags
}
