//! Markup assembly
//!
//! Produces the markup fragments the host inserts into its page: the
//! rendered record list, the pagination controls, and the empty/error
//! states. Rendered item fragments are tagged with `data-grid-item` so a
//! re-render can remove exactly the previously inserted fragments; controls
//! carry `data-grid-page` values (`"prev"`, `"next"`, or a zero-based index)
//! that feed back into [`PageEvent::parse`](crate::PageEvent::parse).

use serde_json::Value;

use crate::config::WidgetConfig;
use crate::pagination::ControlState;
use crate::template::{escape_html, render_record};

/// The rendered output for one page of a widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    /// Markup for the content area (title, record fragments, or the
    /// empty/error message).
    pub content: String,
    /// Markup for the pagination controls; empty when there is at most one
    /// page.
    pub controls: String,
}

/// Render the visible slice of records, one tagged fragment per record.
///
/// Fragments that render to whitespace only are skipped; fragments whose
/// top-level node is an element get a `data-grid-item="true"` attribute for
/// idempotent replacement on page changes.
#[must_use]
pub fn render_items(records: &[Value], template: &str, config: &WidgetConfig) -> String {
    let mut out = String::new();
    for record in records {
        let html = render_record(template, record, config);
        let fragment = html.trim();
        if fragment.is_empty() {
            continue;
        }
        out.push_str(&tag_fragment(fragment));
    }
    out
}

/// Inject the `data-grid-item` marker into a fragment's top-level element.
///
/// A fragment that does not start with an element tag (bare text, comments,
/// closing tags) passes through unchanged.
pub(crate) fn tag_fragment(fragment: &str) -> String {
    if !fragment.starts_with('<') {
        return fragment.to_string();
    }

    let mut chars = fragment.char_indices().skip(1);
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => return fragment.to_string(),
    }

    for (i, c) in chars {
        if c.is_whitespace() || c == '>' || c == '/' {
            return format!(
                "{} data-grid-item=\"true\"{}",
                &fragment[..i],
                &fragment[i..]
            );
        }
    }

    fragment.to_string()
}

/// Render the pagination controls for the given state.
///
/// At most one page means no controls at all. Otherwise: a prev arrow, one
/// numbered button per page (1-based labels over zero-based event values),
/// and a next arrow; the current page is marked active and the edge arrows
/// are disabled at their respective bounds.
#[must_use]
pub fn render_controls(state: &ControlState) -> String {
    if state.total_pages <= 1 {
        return String::new();
    }

    let mut html =
        String::from("<div class=\"listing-grid-pagination\" data-grid-pagination=\"true\">");

    html.push_str(&nav_button("prev", "&lsaquo;", state.prev_disabled, false));
    for page in 0..state.total_pages {
        html.push_str(&nav_button(
            &page.to_string(),
            &(page + 1).to_string(),
            false,
            page == state.active_page,
        ));
    }
    html.push_str(&nav_button("next", "&rsaquo;", state.next_disabled, false));

    html.push_str("</div>");
    html
}

/// One pagination button.
fn nav_button(value: &str, label: &str, disabled: bool, active: bool) -> String {
    let mut attrs = format!(" data-grid-page=\"{value}\"");
    if active {
        attrs.push_str(" data-grid-active=\"true\"");
    }
    if disabled {
        attrs.push_str(" disabled data-grid-disabled=\"true\"");
    }
    format!("<button type=\"button\"{attrs}>{label}</button>")
}

/// Render the configured empty-state message.
#[must_use]
pub fn render_empty(empty_text: &str) -> String {
    format!("<p>{}</p>", escape_html(empty_text))
}

/// Render a single human-readable error message for the content area.
#[must_use]
pub fn render_error(message: &str) -> String {
    format!("<p>{}</p>", escape_html(message))
}

/// Render the optional widget heading; an empty title renders nothing.
#[must_use]
pub fn render_title(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!("<h3>{}</h3>", escape_html(title))
    }
}
