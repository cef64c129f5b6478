//! Response-shape normalization
//!
//! The search endpoint's response envelope is not stable across API versions:
//! the record array and the continuation cursor each appear under one of
//! several keys. These helpers walk the known shapes in a fixed priority
//! order and degrade to "nothing found" rather than erroring.

use serde_json::Value;

/// Pull the record array out of a response body, whichever shape it uses.
///
/// Checked in order: top-level `records`, nested `data.records`, a top-level
/// `data` array, `results`, `items`. The first array found wins; a body that
/// matches none of them yields an empty page, not an error.
#[must_use]
pub fn extract_records(body: Value) -> Vec<Value> {
    let Value::Object(mut map) = body else {
        return Vec::new();
    };

    if let Some(Value::Array(records)) = map.remove("records") {
        return records;
    }

    match map.remove("data") {
        Some(Value::Object(mut data)) => {
            if let Some(Value::Array(records)) = data.remove("records") {
                return records;
            }
        }
        Some(Value::Array(data)) => return data,
        _ => {}
    }

    if let Some(Value::Array(results)) = map.remove("results") {
        return results;
    }

    if let Some(Value::Array(items)) = map.remove("items") {
        return items;
    }

    Vec::new()
}

/// Pull the next-page cursor out of a response body, if any.
///
/// Checked in priority order: `meta.nextStartAfterId`, `meta.startAfterId`,
/// then top-level `nextStartAfterId`, `startAfterId`, `nextCursor`, `cursor`,
/// `nextPage`. Empty strings and zero count as absent; a numeric cursor
/// (e.g. `nextPage`) is rendered to its string form.
#[must_use]
pub fn extract_next_cursor(body: &Value) -> Option<String> {
    let meta = body.get("meta");
    let candidates = [
        meta.and_then(|m| m.get("nextStartAfterId")),
        meta.and_then(|m| m.get("startAfterId")),
        body.get("nextStartAfterId"),
        body.get("startAfterId"),
        body.get("nextCursor"),
        body.get("cursor"),
        body.get("nextPage"),
    ];

    candidates.into_iter().flatten().find_map(cursor_text)
}

/// Render a cursor value to text, treating falsy values as absent.
fn cursor_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if n.as_i64() == Some(0) || n.as_u64() == Some(0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        _ => None,
    }
}
