//! Payload location in tag page markup
//!
//! Tag pages have shipped their data in several shapes over time. Each shape
//! gets its own strategy; the first one that yields parseable JSON wins.

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

/// `window._sharedData = {...};</script>`
static SHARED_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)window\._sharedData\s*=\s*(\{.*?\});</script>")
        .expect("Failed to compile shared data regex")
});

/// `window.__additionalDataLoaded('...', {...});`
static ADDITIONAL_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)window\.__additionalDataLoaded\('.*?',\s*(\{.*?\})\);")
        .expect("Failed to compile additional data regex")
});

static LD_JSON_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("Failed to parse JSON-LD selector")
});

type Strategy = fn(&str) -> Option<Value>;

/// Strategies in the order they are tried
const STRATEGIES: &[(&str, Strategy)] = &[
    ("shared data", from_shared_data),
    ("additional data", from_additional_data),
    ("JSON-LD", from_ld_json),
];

/// Recovers the structured payload embedded in tag page markup
///
/// # Returns
///
/// * `Some(Value)` - The payload found by the first successful strategy
/// * `None` - No strategy produced parseable JSON
pub fn locate_payload(html: &str) -> Option<Value> {
    for (name, strategy) in STRATEGIES {
        if let Some(payload) = strategy(html) {
            tracing::debug!("Located payload using {} strategy", name);
            return Some(payload);
        }
    }

    tracing::debug!("No recognizable JSON payload found in hashtag page HTML.");
    None
}

/// Script variable assignment terminated by `;</script>`
fn from_shared_data(html: &str) -> Option<Value> {
    let captures = SHARED_DATA_RE.captures(html)?;
    parse_json(&captures[1], "shared data")
}

/// Second argument of the data-loaded callback
fn from_additional_data(html: &str) -> Option<Value> {
    let captures = ADDITIONAL_DATA_RE.captures(html)?;
    parse_json(&captures[1], "additional data")
}

/// First `application/ld+json` script that parses to a JSON object
fn from_ld_json(html: &str) -> Option<Value> {
    let document = Html::parse_document(html);

    document.select(&LD_JSON_SELECTOR).find_map(|script| {
        let text = script.text().collect::<String>();
        match serde_json::from_str::<Value>(text.trim()) {
            Ok(value) if value.is_object() => Some(value),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Skipping unparseable JSON-LD block: {}", e);
                None
            }
        }
    })
}

fn parse_json(text: &str, source: &str) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Failed to decode {} payload: {}", source, e);
            None
        }
    }
}
