//! Widget instance configuration
//!
//! One [`WidgetConfig`] is resolved per widget instance from the host's flat
//! key/value attributes, then treated as read-only. Every field has a
//! documented default; numeric fields that fail to parse (or are not
//! positive) silently fall back to their default rather than erroring, since
//! host-page attributes are free-form text.

use std::collections::HashMap;

use listing_grid_client::{
    ApiCredentials, DEFAULT_API_VERSION, DEFAULT_BASE_URL, FetchPlan, PagingMode, SortClause,
    SortOrder,
};

use crate::error::ConfigError;

/// Default object schema queried when the host does not name one.
pub const DEFAULT_SCHEMA_KEY: &str = "custom_objects.service_status_events";
/// Default message shown when the fetch yields zero records.
pub const DEFAULT_EMPTY_TEXT: &str = "No outage events found.";

const DEFAULT_PAGE_LIMIT: u32 = 100;
const DEFAULT_MAX_PAGES: u32 = 20;
const DEFAULT_PAGE_SIZE: usize = 10;

/// Field keys feeding the composite `event_datetime` template token.
#[derive(Debug, Clone)]
pub struct EventDatetimeFields {
    /// Field holding the event date text.
    pub date: String,
    /// Field holding the hour component.
    pub hour: String,
    /// Field holding the minute component.
    pub minute: String,
    /// Field holding the am/pm marker.
    pub am_pm: String,
}

impl Default for EventDatetimeFields {
    fn default() -> Self {
        Self {
            date: "event_date".to_string(),
            hour: "event_hour".to_string(),
            minute: "event_minute".to_string(),
            am_pm: "event_am_pm".to_string(),
        }
    }
}

/// Resolved configuration for one widget instance.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Bearer token for the search API (required).
    pub api_token: String,
    /// Tenant/location identifier (required).
    pub location_id: String,
    /// Object schema key to query.
    pub schema_key: String,
    /// URL the markup template is fetched from (required).
    pub template_url: String,
    /// Search API base URL.
    pub base_url: String,
    /// Search API version header value.
    pub api_version: String,
    /// Field key to sort by; empty disables sorting.
    pub sort_field: String,
    /// Sort direction; descending only when explicitly configured.
    pub sort_order: SortOrder,
    /// Server page size requested per round trip.
    pub page_limit: u32,
    /// Hard cap on fetch round trips.
    pub max_pages: u32,
    /// Client-side page size for the rendered view.
    pub page_size: usize,
    /// Message rendered when no records come back.
    pub empty_text: String,
    /// Optional heading rendered above the list; empty renders nothing.
    pub title: String,
    /// Verbose logging of resolved config and record shapes.
    pub debug: bool,
    /// Which pagination contract the endpoint speaks.
    pub paging_mode: PagingMode,
    /// Transient-failure retries per page request.
    pub max_retries: u32,
    /// Field keys for the composite `event_datetime` token.
    pub event_datetime: EventDatetimeFields,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            location_id: String::new(),
            schema_key: DEFAULT_SCHEMA_KEY.to_string(),
            template_url: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            sort_field: String::new(),
            sort_order: SortOrder::Asc,
            page_limit: DEFAULT_PAGE_LIMIT,
            max_pages: DEFAULT_MAX_PAGES,
            page_size: DEFAULT_PAGE_SIZE,
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
            title: String::new(),
            debug: false,
            paging_mode: PagingMode::Numeric,
            max_retries: 0,
            event_datetime: EventDatetimeFields::default(),
        }
    }
}

impl WidgetConfig {
    /// Resolve a configuration from the host's flat key/value attributes.
    ///
    /// Missing keys take their documented defaults; required fields are only
    /// checked by [`validate`](Self::validate) so the caller can surface one
    /// coherent message.
    #[must_use]
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let paging_mode = match map.get("pagingMode").map(String::as_str) {
            None | Some("") => defaults.paging_mode,
            Some(raw) => PagingMode::parse(raw).unwrap_or_else(|| {
                log::warn!("[config] Unknown paging mode '{raw}', using {}", defaults.paging_mode);
                defaults.paging_mode
            }),
        };

        Self {
            api_token: text(map, "apiToken", &defaults.api_token),
            location_id: text(map, "locationId", &defaults.location_id),
            schema_key: text(map, "schemaKey", &defaults.schema_key),
            template_url: text(map, "templateUrl", &defaults.template_url),
            base_url: text(map, "baseUrl", &defaults.base_url),
            api_version: text(map, "version", &defaults.api_version),
            sort_field: text(map, "sortField", &defaults.sort_field),
            sort_order: SortOrder::parse(&text(map, "sortOrder", "")),
            page_limit: positive_u32(map, "pageLimit", defaults.page_limit),
            max_pages: positive_u32(map, "maxPages", defaults.max_pages),
            page_size: positive_usize(map, "pageSize", defaults.page_size),
            empty_text: text(map, "emptyText", &defaults.empty_text),
            title: text(map, "title", &defaults.title),
            debug: map.get("debug").is_some_and(|v| v == "true"),
            paging_mode,
            max_retries: map
                .get("maxRetries")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_retries),
            event_datetime: EventDatetimeFields {
                date: text(map, "eventDateField", &defaults.event_datetime.date),
                hour: text(map, "eventHourField", &defaults.event_datetime.hour),
                minute: text(map, "eventMinuteField", &defaults.event_datetime.minute),
                am_pm: text(map, "eventAmPmField", &defaults.event_datetime.am_pm),
            },
        }
    }

    /// Check that every required field is present and non-blank.
    ///
    /// Checked in order: api token, location id, schema key, template URL.
    /// The first missing field is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            (self.api_token.as_str(), "apiToken", "api token"),
            (self.location_id.as_str(), "locationId", "location id"),
            (self.schema_key.as_str(), "schemaKey", "schema key"),
            (self.template_url.as_str(), "templateUrl", "template URL"),
        ];
        for (value, field, label) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                    label: label.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Credentials for constructing the search client.
    #[must_use]
    pub fn credentials(&self) -> ApiCredentials {
        ApiCredentials {
            api_token: self.api_token.clone(),
            schema_key: self.schema_key.clone(),
            base_url: self.base_url.clone(),
            api_version: self.api_version.clone(),
        }
    }

    /// The read-only fetch description handed to the paging strategy.
    #[must_use]
    pub fn fetch_plan(&self) -> FetchPlan {
        FetchPlan {
            location_id: self.location_id.clone(),
            page_limit: self.page_limit,
            max_pages: self.max_pages,
            sort: SortClause::from_config(&self.sort_field, self.sort_order),
        }
    }
}

/// String field with a default for absent or empty values.
fn text(map: &HashMap<String, String>, key: &str, default: &str) -> String {
    match map.get(key) {
        Some(v) if !v.is_empty() => v.clone(),
        _ => default.to_string(),
    }
}

/// Positive integer field; unparseable or non-positive values fall back.
fn positive_u32(map: &HashMap<String, String>, key: &str, default: u32) -> u32 {
    map.get(key)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Positive integer field; unparseable or non-positive values fall back.
fn positive_usize(map: &HashMap<String, String>, key: &str, default: usize) -> usize {
    map.get(key)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_applied_on_empty_map() {
        let config = WidgetConfig::from_map(&HashMap::new());
        assert_eq!(config.schema_key, DEFAULT_SCHEMA_KEY);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.empty_text, DEFAULT_EMPTY_TEXT);
        assert_eq!(config.page_limit, 100);
        assert_eq!(config.max_pages, 20);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.paging_mode, PagingMode::Numeric);
        assert!(!config.debug);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = WidgetConfig::from_map(&map(&[
            ("apiToken", "tok"),
            ("locationId", "loc"),
            ("schemaKey", "custom_objects.outage_events"),
            ("templateUrl", "https://example.com/tpl.html"),
            ("pageLimit", "50"),
            ("maxPages", "5"),
            ("pageSize", "25"),
            ("sortField", "a.b.start_date"),
            ("sortOrder", "DESC"),
            ("pagingMode", "cursor"),
            ("debug", "true"),
        ]));
        assert_eq!(config.api_token, "tok");
        assert_eq!(config.schema_key, "custom_objects.outage_events");
        assert_eq!(config.page_limit, 50);
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.sort_order, SortOrder::Desc);
        assert_eq!(config.paging_mode, PagingMode::Cursor);
        assert!(config.debug);
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let config = WidgetConfig::from_map(&map(&[
            ("pageLimit", "not-a-number"),
            ("maxPages", "0"),
            ("pageSize", "-3"),
        ]));
        assert_eq!(config.page_limit, 100);
        assert_eq!(config.max_pages, 20);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn unknown_paging_mode_falls_back() {
        let config = WidgetConfig::from_map(&map(&[("pagingMode", "offset")]));
        assert_eq!(config.paging_mode, PagingMode::Numeric);
    }

    #[test]
    fn sort_order_desc_only_when_explicit() {
        assert_eq!(
            WidgetConfig::from_map(&map(&[("sortOrder", "descending")])).sort_order,
            SortOrder::Asc
        );
        assert_eq!(
            WidgetConfig::from_map(&map(&[("sortOrder", "desc")])).sort_order,
            SortOrder::Desc
        );
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let config = WidgetConfig::from_map(&map(&[("locationId", "loc")]));
        let result = config.validate();
        match result {
            Err(ConfigError::MissingField { field, .. }) => assert_eq!(field, "apiToken"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn validate_requires_template_url() {
        let config = WidgetConfig::from_map(&map(&[("apiToken", "t"), ("locationId", "l")]));
        let result = config.validate();
        match result {
            Err(ConfigError::MissingField { field, .. }) => assert_eq!(field, "templateUrl"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_complete_config() {
        let config = WidgetConfig::from_map(&map(&[
            ("apiToken", "t"),
            ("locationId", "l"),
            ("templateUrl", "https://example.com/tpl.html"),
        ]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fetch_plan_uses_short_sort_key() {
        let config = WidgetConfig::from_map(&map(&[
            ("sortField", "custom_objects.events.start_date"),
            ("sortOrder", "desc"),
        ]));
        let plan = config.fetch_plan();
        let sort = plan.sort.expect("missing sort clause");
        assert_eq!(sort.field, "start_date");
        assert_eq!(sort.direction, SortOrder::Desc);
    }

    #[test]
    fn fetch_plan_without_sort_field() {
        let plan = WidgetConfig::default().fetch_plan();
        assert!(plan.sort.is_none());
    }

    #[test]
    fn event_datetime_fields_configurable() {
        let config = WidgetConfig::from_map(&map(&[("eventHourField", "start_hour")]));
        assert_eq!(config.event_datetime.hour, "start_hour");
        assert_eq!(config.event_datetime.date, "event_date");
    }
}
