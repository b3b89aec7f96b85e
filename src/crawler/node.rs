//! Hashtag node resolution and total JSON accessors
//!
//! Payloads come from untrusted markup, so every lookup here returns an
//! `Option` (or an `ExtractError` for present-but-mistyped fields) instead of
//! assuming a shape.

use crate::{ExtractError, ExtractResult};
use serde_json::{Map, Value};

/// One step of a path into a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKey<'a> {
    /// Object member
    Key(&'a str),
    /// Array element
    Index(usize),
}

use PathKey::{Index, Key};

/// Known nestings of the hashtag node, tried in order
const NODE_PATHS: &[&[PathKey<'static>]] = &[
    // Legacy layout
    &[
        Key("entry_data"),
        Key("TagPage"),
        Index(0),
        Key("graphql"),
        Key("hashtag"),
    ],
    &[Key("graphql"), Key("hashtag")],
];

/// Follows `path` from `value`
///
/// Returns `None` on a missing key, an out-of-range index, or a step into a
/// value of the wrong kind.
pub fn get_path<'v>(value: &'v Value, path: &[PathKey<'_>]) -> Option<&'v Value> {
    path.iter().try_fold(value, |current, key| match (key, current) {
        (Key(name), Value::Object(map)) => map.get(*name),
        (Index(idx), Value::Array(items)) => items.get(*idx),
        _ => None,
    })
}

/// Locates the hashtag-level node inside a payload
///
/// The first candidate path that leads to an object wins.
pub fn resolve_node(payload: &Value) -> Option<&Map<String, Value>> {
    NODE_PATHS.iter().enumerate().find_map(|(idx, path)| {
        let node = get_path(payload, path).and_then(Value::as_object);
        if node.is_some() {
            tracing::debug!("Resolved hashtag node using layout #{}", idx + 1);
        }
        node
    })
}

/// Member lookup treating JSON `null` as absent
pub fn field<'v>(obj: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// Optional object member; present but not an object is an error
pub fn opt_object<'v>(
    obj: &'v Map<String, Value>,
    key: &'static str,
) -> ExtractResult<Option<&'v Map<String, Value>>> {
    match field(obj, key) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(ExtractError::WrongType {
            field: key,
            expected: "object",
        }),
    }
}

/// Optional array member; present but not an array is an error
pub fn opt_array<'v>(obj: &'v Map<String, Value>, key: &'static str) -> ExtractResult<&'v [Value]> {
    match field(obj, key) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(ExtractError::WrongType {
            field: key,
            expected: "array",
        }),
    }
}

/// Optional non-empty string member; present but not a string is an error
pub fn opt_str<'v>(obj: &'v Map<String, Value>, key: &'static str) -> ExtractResult<Option<&'v str>> {
    match field(obj, key) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ExtractError::WrongType {
            field: key,
            expected: "string",
        }),
    }
}

/// Coerces a count-like value into a non-negative integer
///
/// | Value | Result |
/// |-------|--------|
/// | absent, `null`, `""` | 0 |
/// | integer | value, negatives clamp to 0 |
/// | float | truncated, negatives clamp to 0 |
/// | integer string | parsed, negatives clamp to 0 |
/// | anything else | `ExtractError::InvalidCount` |
pub fn coerce_count(value: Option<&Value>, field: &'static str) -> ExtractResult<u64> {
    let Some(value) = value else {
        return Ok(0);
    };

    let count = match value {
        Value::Null => Some(0),
        Value::Number(n) => number_to_count(n),
        Value::String(s) => string_to_count(s.trim()),
        _ => None,
    };

    count.ok_or_else(|| ExtractError::InvalidCount {
        field,
        value: value.to_string(),
    })
}

fn number_to_count(n: &serde_json::Number) -> Option<u64> {
    if let Some(n) = n.as_u64() {
        return Some(n);
    }
    if n.is_i64() {
        // Only negative integers fail as_u64
        return Some(0);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => Some(if f <= 0.0 { 0 } else { f.trunc() as u64 }),
        _ => None,
    }
}

fn string_to_count(s: &str) -> Option<u64> {
    if s.is_empty() {
        return Some(0);
    }
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    s.parse::<i64>().ok().map(|n| n.max(0) as u64)
}

/// Numeric or string identifier rendered as text
pub fn opt_id(obj: &Map<String, Value>, key: &'static str) -> ExtractResult<Option<String>> {
    match field(obj, key) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(ExtractError::WrongType {
            field: key,
            expected: "string or number",
        }),
    }
}
