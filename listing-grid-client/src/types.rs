use serde::{Deserialize, Serialize};

// ============ Field Keys ============

/// Reduce a possibly dotted field key to its final path segment.
///
/// The host configuration may address fields by their fully-qualified key
/// (`"custom_objects.outage_events.outage_event_name"`); the search API's
/// sort clause wants the bare field name.
#[must_use]
pub fn short_key(field_key: &str) -> &str {
    field_key.rsplit('.').next().unwrap_or(field_key)
}

// ============ Sorting ============

/// Sort direction for a search request.
///
/// Serialized lowercase (`"asc"` / `"desc"`). Anything that is not an
/// explicit request for descending order normalizes to ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (the default).
    #[default]
    Asc,
    /// Descending order, only when explicitly requested.
    Desc,
}

impl SortOrder {
    /// Parse a configured sort order string; `"desc"` (any case) is the only
    /// spelling that selects descending order.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// A single sort clause attached to a search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortClause {
    /// Short field name to sort by.
    pub field: String,
    /// Sort direction.
    pub direction: SortOrder,
}

impl SortClause {
    /// Build a sort clause from a configured field key, reducing dotted keys
    /// to their short form. An empty field key yields no clause.
    #[must_use]
    pub fn from_config(sort_field: &str, sort_order: SortOrder) -> Option<Self> {
        let field = short_key(sort_field.trim());
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            direction: sort_order,
        })
    }
}

// ============ Search Payload ============

/// JSON body for one page request against the search endpoint.
///
/// One struct covers both addressing modes: numeric mode fills `page` +
/// `page_limit`, cursor mode fills `start_after_id` plus either `page_limit`
/// or `limit` depending on which body shape the endpoint accepts. Unset keys
/// are omitted from the serialized body entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    /// Tenant/location identifier, present in every request.
    pub location_id: String,
    /// Numeric-mode page counter (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Server page size under the `pageLimit` key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_limit: Option<u32>,
    /// Server page size under the `limit` key (cursor-mode fallback shape).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Opaque cursor from the previous response (absent on the first call).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_after_id: Option<String>,
    /// Single-clause sort, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortClause>>,
}

impl SearchPayload {
    /// Base payload carrying only the location identifier.
    #[must_use]
    pub fn new(location_id: impl Into<String>) -> Self {
        Self {
            location_id: location_id.into(),
            page: None,
            page_limit: None,
            limit: None,
            start_after_id: None,
            sort: None,
        }
    }
}

// ============ Fetch Plan ============

/// Read-only description of one full record fetch.
///
/// Constructed once from the widget configuration and handed to a paging
/// strategy; the strategy derives every per-page payload from it.
#[derive(Debug, Clone)]
pub struct FetchPlan {
    /// Tenant/location identifier sent with every page request.
    pub location_id: String,
    /// Requested server page size (> 0).
    pub page_limit: u32,
    /// Hard cap on round trips (> 0).
    pub max_pages: u32,
    /// Optional single sort clause.
    pub sort: Option<SortClause>,
}

impl FetchPlan {
    /// Clamp plan values to valid ranges.
    ///
    /// - `page_limit` is clamped to `>= 1`
    /// - `max_pages` is clamped to `>= 1`
    #[must_use]
    pub fn validated(&self) -> Self {
        Self {
            location_id: self.location_id.clone(),
            page_limit: self.page_limit.max(1),
            max_pages: self.max_pages.max(1),
            sort: self.sort.clone(),
        }
    }

    /// Sort clauses for a request payload, when a sort is configured.
    #[must_use]
    pub fn sort_clauses(&self) -> Option<Vec<SortClause>> {
        self.sort.clone().map(|clause| vec![clause])
    }
}

// ============ Paging Mode ============

/// Which pagination contract the remote endpoint speaks.
///
/// The two widget variants in the field disagree on the server contract, so
/// both are supported behind [`RecordPager`](crate::RecordPager); the host
/// picks one per widget instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagingMode {
    /// Incrementing `page` counter; stop on a short page.
    #[default]
    Numeric,
    /// Opaque `startAfterId` cursor with body-shape fallback.
    Cursor,
}

impl PagingMode {
    /// Parse a configured mode string (case-insensitive). Unknown spellings
    /// yield `None` so the caller can fall back to the default with a warning.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "numeric" | "page" => Some(Self::Numeric),
            "cursor" => Some(Self::Cursor),
            _ => None,
        }
    }
}

impl std::fmt::Display for PagingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Cursor => write!(f, "cursor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ short_key ============

    #[test]
    fn short_key_reduces_dotted() {
        assert_eq!(short_key("custom_objects.outage_events.name"), "name");
    }

    #[test]
    fn short_key_passthrough_plain() {
        assert_eq!(short_key("status"), "status");
    }

    #[test]
    fn short_key_empty() {
        assert_eq!(short_key(""), "");
    }

    // ============ SortOrder ============

    #[test]
    fn sort_order_parse_desc_case_insensitive() {
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
    }

    #[test]
    fn sort_order_parse_anything_else_is_asc() {
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse(""), SortOrder::Asc);
        assert_eq!(SortOrder::parse("descending"), SortOrder::Asc);
    }

    #[test]
    fn sort_order_serializes_lowercase() {
        let json_res = serde_json::to_string(&SortOrder::Desc);
        assert!(json_res.is_ok(), "to_string failed: {json_res:?}");
        let Ok(json) = json_res else {
            return;
        };
        assert_eq!(json, "\"desc\"");
    }

    // ============ SortClause ============

    #[test]
    fn sort_clause_from_dotted_config() {
        let clause = SortClause::from_config("custom_objects.events.start_date", SortOrder::Desc);
        assert!(clause.is_some(), "expected Some(..), got {clause:?}");
        let Some(clause) = clause else {
            return;
        };
        assert_eq!(clause.field, "start_date");
        assert_eq!(clause.direction, SortOrder::Desc);
    }

    #[test]
    fn sort_clause_empty_field_is_none() {
        assert!(SortClause::from_config("", SortOrder::Asc).is_none());
        assert!(SortClause::from_config("   ", SortOrder::Asc).is_none());
    }

    // ============ SearchPayload ============

    #[test]
    fn payload_numeric_shape() {
        let payload = SearchPayload {
            page: Some(2),
            page_limit: Some(100),
            sort: Some(vec![SortClause {
                field: "name".into(),
                direction: SortOrder::Asc,
            }]),
            ..SearchPayload::new("loc-1")
        };
        let json_res = serde_json::to_value(&payload);
        assert!(json_res.is_ok(), "to_value failed: {json_res:?}");
        let Ok(json) = json_res else {
            return;
        };
        assert_eq!(json["locationId"], "loc-1");
        assert_eq!(json["page"], 2);
        assert_eq!(json["pageLimit"], 100);
        assert_eq!(json["sort"][0]["field"], "name");
        assert_eq!(json["sort"][0]["direction"], "asc");
        assert!(json.get("limit").is_none());
        assert!(json.get("startAfterId").is_none());
    }

    #[test]
    fn payload_cursor_fallback_shape() {
        let payload = SearchPayload {
            limit: Some(50),
            start_after_id: Some("abc123".into()),
            ..SearchPayload::new("loc-1")
        };
        let json_res = serde_json::to_value(&payload);
        assert!(json_res.is_ok(), "to_value failed: {json_res:?}");
        let Ok(json) = json_res else {
            return;
        };
        assert_eq!(json["limit"], 50);
        assert_eq!(json["startAfterId"], "abc123");
        assert!(json.get("page").is_none());
        assert!(json.get("pageLimit").is_none());
    }

    // ============ FetchPlan ============

    #[test]
    fn fetch_plan_validated_clamps_zeroes() {
        let plan = FetchPlan {
            location_id: "loc".into(),
            page_limit: 0,
            max_pages: 0,
            sort: None,
        };
        let v = plan.validated();
        assert_eq!(v.page_limit, 1);
        assert_eq!(v.max_pages, 1);
    }

    #[test]
    fn fetch_plan_sort_clauses_single_entry() {
        let plan = FetchPlan {
            location_id: "loc".into(),
            page_limit: 100,
            max_pages: 20,
            sort: SortClause::from_config("a.b.start", SortOrder::Desc),
        };
        let clauses = plan.sort_clauses();
        assert!(clauses.is_some(), "expected Some(..), got {clauses:?}");
        let Some(clauses) = clauses else {
            return;
        };
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].field, "start");
    }

    // ============ PagingMode ============

    #[test]
    fn paging_mode_parse_known() {
        assert_eq!(PagingMode::parse("numeric"), Some(PagingMode::Numeric));
        assert_eq!(PagingMode::parse("Cursor"), Some(PagingMode::Cursor));
        assert_eq!(PagingMode::parse("page"), Some(PagingMode::Numeric));
    }

    #[test]
    fn paging_mode_parse_unknown_is_none() {
        assert_eq!(PagingMode::parse("offset"), None);
        assert_eq!(PagingMode::parse(""), None);
    }

    #[test]
    fn paging_mode_default_is_numeric() {
        assert_eq!(PagingMode::default(), PagingMode::Numeric);
    }
}
