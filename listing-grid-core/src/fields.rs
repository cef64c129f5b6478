//! Shape-agnostic field resolution
//!
//! Records returned by the search endpoint carry no fixed schema: custom
//! field data may live under any one of several container keys depending on
//! API version and record type, addressed either by a fully-qualified dotted
//! key or by its final path segment. Resolution walks an explicit ordered
//! list of candidate containers with a key-alias pair; absence is `None`,
//! never an error.

use serde_json::Value;

pub use listing_grid_client::short_key;

/// Containers a record may nest its field data under, in lookup order.
pub const CANDIDATE_CONTAINERS: [&str; 7] = [
    "properties",
    "propertyValues",
    "values",
    "customFields",
    "fields",
    "data",
    "attributes",
];

/// Locate a named field in a record of unknown shape.
///
/// Lookup order: the dotted key in every candidate container, then the short
/// key in every candidate container, then the record's own top level (dotted,
/// then short). First match wins. JSON `null` is a present value and resolves
/// as such; only a key that appears nowhere yields `None`.
#[must_use]
pub fn resolve_field<'a>(record: &'a Value, field_key: &str) -> Option<&'a Value> {
    if field_key.is_empty() {
        return None;
    }
    let map = record.as_object()?;
    let short = short_key(field_key);

    for container in CANDIDATE_CONTAINERS {
        if let Some(value) = map.get(container).and_then(|c| c.get(field_key)) {
            return Some(value);
        }
    }

    if short != field_key {
        for container in CANDIDATE_CONTAINERS {
            if let Some(value) = map.get(container).and_then(|c| c.get(short)) {
                return Some(value);
            }
        }
    }

    map.get(field_key).or_else(|| map.get(short))
}

/// Conventional spellings of the last-updated timestamp.
const UPDATED_AT_KEYS: [&str; 2] = ["updatedAt", "updated_at"];

/// Conventional spellings of the creation timestamp.
const CREATED_AT_KEYS: [&str; 6] = [
    "createdAt",
    "created_at",
    "createdOn",
    "created_on",
    "createdTime",
    "created_time",
];

/// Resolve the record's last-updated timestamp from its conventional
/// spellings, top-level first, then nested under `meta`.
#[must_use]
pub fn resolve_updated_at(record: &Value) -> Option<&Value> {
    conventional_lookup(record, &UPDATED_AT_KEYS)
}

/// Resolve the record's creation timestamp from its conventional spellings
/// (including `createdOn`/`createdTime` variants), top-level first, then
/// nested under `meta`.
#[must_use]
pub fn resolve_created_at(record: &Value) -> Option<&Value> {
    conventional_lookup(record, &CREATED_AT_KEYS)
}

/// Resolve a display name: the configured field key first, then the
/// conventional top-level `name`/`title`/`displayName` fallbacks.
#[must_use]
pub fn resolve_display_name<'a>(record: &'a Value, field_key: &str) -> Option<&'a Value> {
    if let Some(value) = resolve_field(record, field_key).filter(|v| is_meaningful(v)) {
        return Some(value);
    }
    let map = record.as_object()?;
    ["name", "title", "displayName"]
        .into_iter()
        .find_map(|key| map.get(key).filter(|v| is_meaningful(v)))
}

/// Walk a fixed key list at the top level, then the same list under `meta`.
fn conventional_lookup<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = record.as_object()?;

    for key in keys {
        if let Some(value) = map.get(*key).filter(|v| is_meaningful(v)) {
            return Some(value);
        }
    }

    let meta = map.get("meta")?;
    for key in keys {
        if let Some(value) = meta.get(*key).filter(|v| is_meaningful(v)) {
            return Some(value);
        }
    }

    None
}

/// Whether a value is usable as a timestamp or name (rules out `null`, empty
/// strings, zero, and `false`).
fn is_meaningful(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}
