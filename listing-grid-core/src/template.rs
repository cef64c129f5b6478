//! Token-substitution template engine
//!
//! Templates are markup strings carrying `{{ token }}` placeholders. Every
//! token resolves through the field resolver (with special handling for the
//! timestamp and composite tokens), the value is HTML-escaped, and an
//! unresolvable token renders as the empty string — never as the literal
//! token text and never as an error.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::config::{EventDatetimeFields, WidgetConfig};
use crate::fields::{resolve_created_at, resolve_field, resolve_updated_at};
use crate::utils::datetime::{format_datetime, parse_datetime};

/// `{{ token }}` — double braces, optional inner whitespace, no closing
/// braces inside the token body.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([^}]+?)\s*\}\}").expect("token pattern is valid")
});

/// Render one record through a template.
///
/// Total function: every placeholder is replaced (resolved and escaped, or
/// empty), the surrounding markup passes through untouched.
#[must_use]
pub fn render_record(template: &str, record: &Value, config: &WidgetConfig) -> String {
    TOKEN_RE
        .replace_all(template, |caps: &Captures| {
            match token_value(record, caps[1].trim(), config) {
                Some(text) => escape_html(&text),
                None => String::new(),
            }
        })
        .into_owned()
}

/// Resolve a single token to its substitution text, before escaping.
fn token_value(record: &Value, token: &str, config: &WidgetConfig) -> Option<String> {
    match token {
        "updatedAt" | "updated_at" => resolve_updated_at(record).map(timestamp_text),
        "createdAt" | "created_at" => resolve_created_at(record).map(timestamp_text),
        "event_datetime" => event_datetime_text(record, &config.event_datetime),
        _ => resolve_field(record, token).and_then(value_text),
    }
}

/// Format a resolved timestamp value, falling back to its raw text when it
/// does not parse as a timestamp.
fn timestamp_text(value: &Value) -> String {
    match parse_datetime(value) {
        Some(dt) => format_datetime(dt),
        None => value_text(value).unwrap_or_default(),
    }
}

/// Assemble the composite event date-time from its four configured fields.
///
/// The time part is `hour:minute am/pm` with the minute zero-padded when it
/// is a single digit; any missing sub-part is omitted, and date and time are
/// joined with a single space.
fn event_datetime_text(record: &Value, fields: &EventDatetimeFields) -> Option<String> {
    let part = |key: &str| {
        resolve_field(record, key)
            .and_then(value_text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let date = part(&fields.date);
    let hour = part(&fields.hour);
    let minute = part(&fields.minute).map(pad_minute);
    let am_pm = part(&fields.am_pm);

    let time = match (hour, minute) {
        (Some(h), Some(m)) => Some(format!("{h}:{m}")),
        (Some(h), None) => Some(h),
        (None, _) => None,
    };
    let time = match (time, am_pm) {
        (Some(t), Some(ap)) => Some(format!("{t} {ap}")),
        (t, _) => t,
    };

    match (date, time) {
        (Some(d), Some(t)) => Some(format!("{d} {t}")),
        (Some(d), None) => Some(d),
        (None, t) => t,
    }
}

/// Zero-pad a single-digit minute value.
fn pad_minute(minute: String) -> String {
    if minute.len() == 1 && minute.chars().all(|c| c.is_ascii_digit()) {
        format!("0{minute}")
    } else {
        minute
    }
}

/// Substitution text for a resolved value; `null` renders as absent.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // Nested structures render as compact JSON rather than disappearing.
        other => serde_json::to_string(other).ok(),
    }
}

/// Escape a value for substitution into markup.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
